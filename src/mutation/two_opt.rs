//! Intra-route 2-opt local search.
//!
//! # Algorithm
//!
//! With the depot as implicit endpoint on both sides, for each pair of
//! positions `i < j` compute the change in route time from reversing the
//! segment `route[i..=j]`:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) − d(prev_i, r[i]) − d(r[j], next_j)
//!       + Σ_{k=i}^{j-1} (d(r[k+1], r[k]) − d(r[k], r[k+1]))
//! ```
//!
//! The sum runs over the segment's inner edges, which change direction. It
//! vanishes on a symmetric matrix, leaving the classic boundary rule.
//!
//! If `delta < 0`, reverse the segment in place and keep scanning. Passes
//! repeat until one finds no improving reversal (first improvement). Every
//! accepted move strictly lowers the route time, so the search terminates
//! on asymmetric matrices too.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::TravelTimes;
use crate::models::{ClientId, Genome};

/// Only routes longer than this are optimised by [`two_opt`].
pub const TWO_OPT_MIN_ROUTE_LEN: usize = 4;

/// Runs 2-opt on one route until it reaches a local optimum.
///
/// Returns `true` if the route changed.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::models::Position;
/// use care_routing::mutation::two_opt_route;
///
/// let points: Vec<_> = (0..=4).map(|x| Position::new(x as f64, 0.0)).collect();
/// let tt = TravelTimes::from_positions(&points);
///
/// let mut route = vec![1, 3, 2, 4];
/// assert!(two_opt_route(&mut route, &tt));
/// assert_eq!(route, vec![1, 2, 3, 4]);
/// assert!(!two_opt_route(&mut route, &tt));
/// ```
pub fn two_opt_route(route: &mut [ClientId], travel: &TravelTimes) -> bool {
    let n = route.len();
    if n < 2 {
        return false;
    }
    let mut changed = false;
    let mut improved = true;
    while improved {
        improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                if reversal_delta(route, travel, i, j) < -1e-10 {
                    route[i..=j].reverse();
                    improved = true;
                    changed = true;
                }
            }
        }
    }
    changed
}

/// Applies [`two_opt_route`] to every route with more than
/// [`TWO_OPT_MIN_ROUTE_LEN`] clients. Returns how many routes changed.
pub fn two_opt(genome: &mut Genome, travel: &TravelTimes) -> usize {
    genome
        .routes_mut()
        .iter_mut()
        .filter(|r| r.len() > TWO_OPT_MIN_ROUTE_LEN)
        .map(|r| two_opt_route(r, travel))
        .filter(|&changed| changed)
        .count()
}

fn reversal_delta(route: &[ClientId], travel: &TravelTimes, i: usize, j: usize) -> f64 {
    let n = route.len();
    let prev_i = if i == 0 { 0 } else { route[i - 1] };
    let next_j = if j == n - 1 { 0 } else { route[j + 1] };

    let old_cost = travel.get(prev_i, route[i]) + travel.get(route[j], next_j);
    let new_cost = travel.get(prev_i, route[j]) + travel.get(route[i], next_j);
    let inner: f64 = route[i..=j]
        .windows(2)
        .map(|w| travel.get(w[1], w[0]) - travel.get(w[0], w[1]))
        .sum();
    new_cost - old_cost + inner
}
