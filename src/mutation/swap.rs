//! Exchange mutations.

use crate::error::{Result, SolverError};
use crate::models::Genome;
use crate::random::RandomSource;

/// Two distinct uniform indices in `0..len` (`len >= 2`).
pub(super) fn distinct_pair<R: RandomSource + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.index(len);
    let mut j = rng.index(len - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Swaps two distinct positions of one random route holding two or more clients.
///
/// # Errors
///
/// [`SolverError::Precondition`] if no route has two clients.
pub fn swap_within<R: RandomSource + ?Sized>(genome: &mut Genome, rng: &mut R) -> Result<()> {
    let eligible = genome.route_indices_where(|r| r.len() >= 2);
    if eligible.is_empty() {
        return Err(SolverError::precondition(
            "swap_within",
            "no route with at least two clients",
        ));
    }
    let route = &mut genome.routes_mut()[eligible[rng.index(eligible.len())]];
    let (i, j) = distinct_pair(route.len(), rng);
    route.swap(i, j);
    Ok(())
}

/// Swaps one random client of a route with one of another route.
///
/// # Errors
///
/// [`SolverError::Precondition`] if fewer than two routes are non-empty.
pub fn swap_between<R: RandomSource + ?Sized>(genome: &mut Genome, rng: &mut R) -> Result<()> {
    let eligible = genome.route_indices_where(|r| !r.is_empty());
    if eligible.len() < 2 {
        return Err(SolverError::precondition(
            "swap_between",
            "fewer than two non-empty routes",
        ));
    }
    let (a, b) = distinct_pair(eligible.len(), rng);
    let (ra, rb) = (eligible[a], eligible[b]);
    let routes = genome.routes_mut();
    let i = rng.index(routes[ra].len());
    let j = rng.index(routes[rb].len());
    let held = routes[ra][i];
    routes[ra][i] = routes[rb][j];
    routes[rb][j] = held;
    Ok(())
}
