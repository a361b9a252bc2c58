//! Constraint-aware greedy construction.
//!
//! # Algorithm
//!
//! Clients are grouped by window end, earliest first. A random client is
//! taken from the earliest non-empty group and appended to the route with
//! the smallest detour among those that stay feasible with it:
//!
//! ```text
//! empty route:  d(0, c) + d(c, 0)
//! otherwise:    d(last, c) + d(c, 0) − d(last, 0)
//! ```
//!
//! If some client fits nowhere, the whole genome is discarded and built
//! again, up to a fixed number of attempts.
//!
//! # Complexity
//!
//! O(n · m · L) per attempt, where m = workers and L = longest route.

use crate::error::{Result, SolverError};
use crate::evaluation::is_route_feasible;
use crate::models::{ClientId, Genome, ProblemInstance};
use crate::random::RandomSource;
use tracing::trace;

/// Builds a strictly feasible genome, retrying up to `max_attempts` times.
///
/// # Errors
///
/// [`SolverError::ConstructionExhausted`] when every attempt left some
/// client without a feasible route.
///
/// # Examples
///
/// ```
/// use care_routing::constructive::feasible_greedy;
/// use care_routing::distance::TravelTimes;
/// use care_routing::evaluation::is_solution_valid;
/// use care_routing::models::{Client, Depot, Position, ProblemInstance, TimeWindow};
/// use care_routing::random::SeededSource;
///
/// let positions: Vec<_> = (0..=4).map(|x| Position::new(x as f64, 0.0)).collect();
/// let tw = TimeWindow::new(0.0, 50.0).unwrap();
/// let clients = (1..=4).map(|id| Client::new(id, 3, tw, 2.0, positions[id])).collect();
/// let instance = ProblemInstance::new(
///     "line", 2, 6, 0.0, Depot::new(positions[0], 60.0), clients,
///     TravelTimes::from_positions(&positions),
/// )
/// .unwrap();
///
/// let genome = feasible_greedy(&instance, 10, &mut SeededSource::new(3)).unwrap();
/// assert!(is_solution_valid(&instance, &genome));
/// ```
pub fn feasible_greedy<R: RandomSource + ?Sized>(
    instance: &ProblemInstance,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Genome> {
    let attempts = max_attempts.max(1);
    let mut stuck = 0;
    for attempt in 1..=attempts {
        match build_once(instance, rng) {
            Ok(genome) => return Ok(genome),
            Err(client) => {
                trace!(attempt, client, "greedy construction stuck, retrying");
                stuck = client;
            }
        }
    }
    Err(SolverError::ConstructionExhausted {
        attempts,
        client: stuck,
    })
}

/// One construction pass. `Err` carries the client that could not be placed.
fn build_once<R: RandomSource + ?Sized>(
    instance: &ProblemInstance,
    rng: &mut R,
) -> std::result::Result<Genome, ClientId> {
    let mut genome = Genome::empty(instance.num_workers());
    for mut group in groups_by_window_end(instance) {
        while !group.is_empty() {
            let client = group.remove(rng.index(group.len()));
            let worker = cheapest_feasible_append(instance, genome.routes_mut(), client)
                .ok_or(client)?;
            genome.routes_mut()[worker].push(client);
        }
    }
    Ok(genome)
}

/// Client ids grouped by equal window end, ascending.
fn groups_by_window_end(instance: &ProblemInstance) -> Vec<Vec<ClientId>> {
    let mut clients: Vec<_> = instance.clients().iter().collect();
    clients.sort_by(|a, b| a.window().end().total_cmp(&b.window().end()));

    let mut groups: Vec<Vec<ClientId>> = Vec::new();
    let mut current_end = None;
    for c in clients {
        let end = c.window().end();
        match groups.last_mut() {
            Some(group) if current_end == Some(end) => group.push(c.id()),
            _ => {
                groups.push(vec![c.id()]);
                current_end = Some(end);
            }
        }
    }
    groups
}

/// Worker whose route takes `client` at its end with the least extra travel.
///
/// Ties go to the lowest worker index.
fn cheapest_feasible_append(
    instance: &ProblemInstance,
    routes: &mut [Vec<ClientId>],
    client: ClientId,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (worker, route) in routes.iter_mut().enumerate() {
        let detour = append_detour(instance, route, client);
        if best.is_some_and(|(_, d)| detour >= d) {
            continue;
        }
        route.push(client);
        let feasible = is_route_feasible(instance, route);
        route.pop();
        if feasible {
            best = Some((worker, detour));
        }
    }
    best.map(|(w, _)| w)
}

fn append_detour(instance: &ProblemInstance, route: &[ClientId], client: ClientId) -> f64 {
    match route.last() {
        None => instance.travel_time(0, client) + instance.travel_time(client, 0),
        Some(&last) => {
            instance.travel_time(last, client) + instance.travel_time(client, 0)
                - instance.travel_time(last, 0)
        }
    }
}
