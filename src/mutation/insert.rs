//! Intra-route relocation.

use super::swap::distinct_pair;
use crate::error::{Result, SolverError};
use crate::models::Genome;
use crate::random::RandomSource;

/// Moves one random client of a route (two or more clients) to a different
/// random position in the same route.
///
/// # Errors
///
/// [`SolverError::Precondition`] if no route has two clients.
pub fn insert_within<R: RandomSource + ?Sized>(genome: &mut Genome, rng: &mut R) -> Result<()> {
    let eligible = genome.route_indices_where(|r| r.len() >= 2);
    if eligible.is_empty() {
        return Err(SolverError::precondition(
            "insert_within",
            "no route with at least two clients",
        ));
    }
    let route = &mut genome.routes_mut()[eligible[rng.index(eligible.len())]];
    // final positions range over the same 0..len as the original ones
    let (from, to) = distinct_pair(route.len(), rng);
    let client = route.remove(from);
    route.insert(to, client);
    Ok(())
}
