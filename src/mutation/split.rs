//! Hand part of a route to an idle worker.

use crate::distance::TravelTimes;
use crate::error::{Result, SolverError};
use crate::models::{ClientId, Genome};
use crate::random::RandomSource;

/// Splits a random route with two or more clients at its longest internal
/// edge and gives the tail to a random idle worker.
///
/// Returns `Ok(false)` without touching the genome when no worker is idle.
///
/// # Errors
///
/// [`SolverError::Precondition`] if a worker is idle but no route has two
/// clients to split.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::models::{Genome, Position};
/// use care_routing::mutation::split_journey;
/// use care_routing::random::SeededSource;
///
/// let points = [0.0, 1.0, 2.0, 9.0, 10.0].map(|x| Position::new(x, 0.0));
/// let tt = TravelTimes::from_positions(&points);
/// let mut g = Genome::new(vec![vec![1, 2, 3, 4], vec![]]);
///
/// assert!(split_journey(&mut g, &tt, &mut SeededSource::new(0)).unwrap());
/// assert_eq!(g.routes(), &[vec![1, 2], vec![3, 4]]);
/// ```
pub fn split_journey<R: RandomSource + ?Sized>(
    genome: &mut Genome,
    travel: &TravelTimes,
    rng: &mut R,
) -> Result<bool> {
    let idle = genome.route_indices_where(|r| r.is_empty());
    if idle.is_empty() {
        return Ok(false);
    }
    let donors = genome.route_indices_where(|r| r.len() >= 2);
    if donors.is_empty() {
        return Err(SolverError::precondition(
            "split_journey",
            "no route with at least two clients to split",
        ));
    }
    let target = idle[rng.index(idle.len())];
    let donor = donors[rng.index(donors.len())];

    let routes = genome.routes_mut();
    let cut = longest_edge(&routes[donor], travel) + 1;
    let tail = routes[donor].split_off(cut);
    routes[target] = tail;
    Ok(true)
}

/// Index `k` of the longest edge `route[k] → route[k + 1]`; first on ties.
fn longest_edge(route: &[ClientId], travel: &TravelTimes) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (k, w) in route.windows(2).enumerate() {
        let d = travel.get(w[0], w[1]);
        if d > best.1 {
            best = (k, d);
        }
    }
    best.0
}
