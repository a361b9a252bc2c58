//! Move one client to another worker.

use crate::error::{Result, SolverError};
use crate::models::Genome;
use crate::random::RandomSource;

const NAME: &str = "reassign_one";

/// Default retry budget for drawing a non-empty source and a distinct destination.
pub const DEFAULT_REASSIGN_ATTEMPTS: usize = 100;

/// Removes a random client from a random non-empty route and inserts it at a
/// random position of a different random route (position 0 if that route is
/// empty).
///
/// Draw order: source route (redrawn while empty), destination route
/// (redrawn while equal to the source), client position, insertion position.
///
/// # Errors
///
/// - [`SolverError::Precondition`] with fewer than two workers or no visits
/// - [`SolverError::RetryLimitExceeded`] if a draw keeps failing for `max_attempts` tries
pub fn reassign_one<R: RandomSource + ?Sized>(
    genome: &mut Genome,
    max_attempts: usize,
    rng: &mut R,
) -> Result<()> {
    let workers = genome.num_workers();
    if workers < 2 {
        return Err(SolverError::precondition(NAME, "needs at least two workers"));
    }
    if genome.num_visits() == 0 {
        return Err(SolverError::precondition(NAME, "every route is empty"));
    }

    let source = draw_until(max_attempts, || {
        let r = rng.int_inclusive(0, workers - 1);
        (!genome.route(r).is_empty()).then_some(r)
    })?;
    let dest = draw_until(max_attempts, || {
        let r = rng.int_inclusive(0, workers - 1);
        (r != source).then_some(r)
    })?;

    let routes = genome.routes_mut();
    let from = rng.index(routes[source].len());
    let client = routes[source].remove(from);
    let at = if routes[dest].is_empty() {
        0
    } else {
        rng.int_inclusive(0, routes[dest].len())
    };
    routes[dest].insert(at, client);
    Ok(())
}

fn draw_until(max_attempts: usize, mut draw: impl FnMut() -> Option<usize>) -> Result<usize> {
    (0..max_attempts)
        .find_map(|_| draw())
        .ok_or(SolverError::RetryLimitExceeded {
            operator: NAME,
            attempts: max_attempts,
        })
}
