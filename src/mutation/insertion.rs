//! Greedy cheapest feasible insertion over the whole genome.
//!
//! # Algorithm
//!
//! Clients are taken in their flattened order and each is inserted at the
//! worker and position with the smallest feasible detour:
//!
//! ```text
//! detour = d(prev, c) + d(c, next) − d(prev, next)
//! ```
//!
//! where `prev`/`next` are the depot at the route ends. A placement is
//! feasible when the candidate route passes the strict route check.
//!
//! # Complexity
//!
//! O(n · m · L²) where m = workers and L = longest route.

use crate::evaluation::is_route_feasible;
use crate::models::{ClientId, Genome, ProblemInstance};
use tracing::trace;

/// Rebuilds `genome` by cheapest feasible insertion.
///
/// Returns `false` and leaves the genome untouched if some client has no
/// feasible placement.
pub fn insertion_heuristic(genome: &mut Genome, instance: &ProblemInstance) -> bool {
    let mut rebuilt = Genome::empty(genome.num_workers());
    for client in genome.flatten() {
        let Some((worker, position)) = cheapest_insertion(instance, rebuilt.routes_mut(), client)
        else {
            trace!(client, "insertion heuristic found no feasible placement");
            return false;
        };
        rebuilt.routes_mut()[worker].insert(position, client);
    }
    *genome = rebuilt;
    true
}

/// Best `(worker, position)` for `client`; ties go to the lowest worker, then position.
fn cheapest_insertion(
    instance: &ProblemInstance,
    routes: &mut [Vec<ClientId>],
    client: ClientId,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (worker, route) in routes.iter_mut().enumerate() {
        for position in 0..=route.len() {
            let cost = insertion_cost(instance, route, position, client);
            if best.is_some_and(|(_, _, b)| cost >= b) {
                continue;
            }
            route.insert(position, client);
            let feasible = is_route_feasible(instance, route);
            route.remove(position);
            if feasible {
                best = Some((worker, position, cost));
            }
        }
    }
    best.map(|(w, p, _)| (w, p))
}

/// Extra travel from inserting `client` before `route[position]`.
fn insertion_cost(
    instance: &ProblemInstance,
    route: &[ClientId],
    position: usize,
    client: ClientId,
) -> f64 {
    let prev = if position == 0 { 0 } else { route[position - 1] };
    let next = route.get(position).copied().unwrap_or(0);
    instance.travel_time(prev, client) + instance.travel_time(client, next)
        - instance.travel_time(prev, next)
}
