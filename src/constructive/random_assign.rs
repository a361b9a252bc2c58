//! Unconstrained random assignment.

use crate::models::{ClientId, Genome, ProblemInstance};
use crate::random::RandomSource;

/// Shuffles all clients and deals them out to workers.
///
/// With `distribute_equally` the shuffled clients go round-robin, so route
/// lengths differ by at most one; otherwise each client goes to a uniformly
/// random worker. Constraints are ignored.
///
/// # Examples
///
/// ```
/// use care_routing::constructive::random_assignment;
/// use care_routing::distance::TravelTimes;
/// use care_routing::models::{Client, Depot, Position, ProblemInstance, TimeWindow};
/// use care_routing::random::SeededSource;
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let clients = (1..=5).map(|id| Client::new(id, 1, tw, 0.0, Position::default())).collect();
/// let instance = ProblemInstance::new(
///     "five", 2, 10, 0.0, Depot::new(Position::default(), 100.0), clients, TravelTimes::new(6),
/// )
/// .unwrap();
///
/// let genome = random_assignment(&instance, true, &mut SeededSource::new(1));
/// assert_eq!(genome.num_visits(), 5);
/// let mut lengths = genome.route_lengths();
/// lengths.sort();
/// assert_eq!(lengths, vec![2, 3]);
/// ```
pub fn random_assignment<R: RandomSource + ?Sized>(
    instance: &ProblemInstance,
    distribute_equally: bool,
    rng: &mut R,
) -> Genome {
    let workers = instance.num_workers();
    let mut ids: Vec<ClientId> = instance.client_ids().collect();
    rng.shuffle(&mut ids);

    let mut genome = Genome::empty(workers);
    let routes = genome.routes_mut();
    for (i, id) in ids.into_iter().enumerate() {
        let worker = if distribute_equally {
            i % workers
        } else {
            rng.index(workers)
        };
        routes[worker].push(id);
    }
    genome
}
