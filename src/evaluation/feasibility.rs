//! Strict feasibility checks.
//!
//! Unlike [`FitnessEvaluator`](super::FitnessEvaluator), these do no penalty
//! arithmetic: they stop at the first violated constraint.

use crate::models::{ClientId, Genome, ProblemInstance};

/// The first constraint a route or genome was found to violate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Infeasibility {
    /// The genome has the wrong number of routes.
    #[error("genome has {actual} routes, instance has {expected} workers")]
    WorkerCount {
        /// Workers in the instance.
        expected: usize,
        /// Routes in the genome.
        actual: usize,
    },

    /// A route names a client the instance doesn't have.
    #[error("unknown client {0}")]
    UnknownClient(ClientId),

    /// A client is visited more than once.
    #[error("client {0} is visited more than once")]
    DuplicateVisit(ClientId),

    /// A client is never visited.
    #[error("client {0} is never visited")]
    MissingClient(ClientId),

    /// A visit finishes after its window closes.
    #[error("client {client} finishes at {finish}, window closes at {end}")]
    MissedWindow {
        /// Client visited.
        client: ClientId,
        /// Service completion time.
        finish: f64,
        /// Window end.
        end: f64,
    },

    /// The running load exceeds worker capacity.
    #[error("load {load} exceeds capacity {capacity} at client {client}")]
    CapacityExceeded {
        /// Client at which the capacity was first exceeded.
        client: ClientId,
        /// Load after serving that client.
        load: u32,
        /// Worker capacity.
        capacity: u32,
    },

    /// The worker is back after the depot deadline.
    #[error("route ends at {completion}, depot closes at {deadline}")]
    LateReturn {
        /// Time back at the depot.
        completion: f64,
        /// Depot return deadline.
        deadline: f64,
    },
}

/// Checks one route's window, capacity and return-time constraints.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::evaluation::{check_route, Infeasibility};
/// use care_routing::models::{Client, Depot, Position, ProblemInstance, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let positions = [Position::new(0.0, 0.0), Position::new(30.0, 40.0)];
/// let instance = ProblemInstance::new(
///     "far",
///     1,
///     10,
///     0.0,
///     Depot::new(positions[0], 60.0),
///     vec![Client::new(1, 1, tw, 0.0, positions[1])],
///     TravelTimes::from_positions(&positions),
/// )
/// .unwrap();
///
/// assert!(check_route(&instance, &[]).is_ok());
/// assert!(matches!(
///     check_route(&instance, &[1]),
///     Err(Infeasibility::LateReturn { .. })
/// ));
/// ```
pub fn check_route(instance: &ProblemInstance, route: &[ClientId]) -> Result<(), Infeasibility> {
    let mut clock = 0.0;
    let mut load: u32 = 0;
    let mut prev = 0;

    for &id in route {
        let client = instance
            .try_client(id)
            .ok_or(Infeasibility::UnknownClient(id))?;
        let arrival = clock + instance.travel_time(prev, id);
        let finish = arrival + client.window().waiting_time(arrival) + client.service_duration();
        if finish > client.window().end() {
            return Err(Infeasibility::MissedWindow {
                client: id,
                finish,
                end: client.window().end(),
            });
        }
        load += client.demand();
        if load > instance.capacity() {
            return Err(Infeasibility::CapacityExceeded {
                client: id,
                load,
                capacity: instance.capacity(),
            });
        }
        clock = finish;
        prev = id;
    }

    if !route.is_empty() {
        clock += instance.travel_time(prev, 0);
    }
    let deadline = instance.depot().return_deadline();
    if clock > deadline {
        return Err(Infeasibility::LateReturn {
            completion: clock,
            deadline,
        });
    }
    Ok(())
}

/// Checks coverage (every client exactly once) and then every route.
pub fn check_genome(instance: &ProblemInstance, genome: &Genome) -> Result<(), Infeasibility> {
    if genome.num_workers() != instance.num_workers() {
        return Err(Infeasibility::WorkerCount {
            expected: instance.num_workers(),
            actual: genome.num_workers(),
        });
    }

    let n = instance.num_clients();
    let mut seen = vec![false; n + 1];
    for &id in genome.routes().iter().flatten() {
        if id == 0 || id > n {
            return Err(Infeasibility::UnknownClient(id));
        }
        if std::mem::replace(&mut seen[id], true) {
            return Err(Infeasibility::DuplicateVisit(id));
        }
    }
    if let Some(missing) = (1..=n).find(|&id| !seen[id]) {
        return Err(Infeasibility::MissingClient(missing));
    }

    genome
        .routes()
        .iter()
        .try_for_each(|route| check_route(instance, route))
}

/// `true` if the route alone meets its window, capacity and return constraints.
pub fn is_route_feasible(instance: &ProblemInstance, route: &[ClientId]) -> bool {
    check_route(instance, route).is_ok()
}

/// `true` if every client is visited exactly once and every route is feasible.
pub fn is_solution_valid(instance: &ProblemInstance, genome: &Genome) -> bool {
    check_genome(instance, genome).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::FitnessEvaluator;
    use crate::test_support::{line_instance, tight_instance};

    #[test]
    fn test_valid_solution() {
        let inst = line_instance();
        let g = Genome::new(vec![vec![1, 2], vec![3, 4]]);
        assert!(is_solution_valid(&inst, &g));
    }

    #[test]
    fn test_coverage_violations() {
        let inst = line_instance();
        assert_eq!(
            check_genome(&inst, &Genome::new(vec![vec![1, 2], vec![3]])),
            Err(Infeasibility::MissingClient(4))
        );
        assert_eq!(
            check_genome(&inst, &Genome::new(vec![vec![1, 2, 4], vec![3, 4]])),
            Err(Infeasibility::DuplicateVisit(4))
        );
        assert_eq!(
            check_genome(&inst, &Genome::new(vec![vec![1, 2, 9], vec![3, 4]])),
            Err(Infeasibility::UnknownClient(9))
        );
        assert_eq!(
            check_genome(&inst, &Genome::new(vec![vec![1, 2, 3, 4]])),
            Err(Infeasibility::WorkerCount {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_missed_window() {
        let inst = tight_instance();
        let err = check_route(&inst, &[1, 3]).unwrap_err();
        assert!(matches!(err, Infeasibility::MissedWindow { client: 3, .. }));
    }

    #[test]
    fn test_capacity_exceeded() {
        let inst = tight_instance();
        // 3, 2, 1 meets every window but carries 12 against 10
        let err = check_route(&inst, &[3, 2, 1]).unwrap_err();
        assert_eq!(
            err,
            Infeasibility::CapacityExceeded {
                client: 1,
                load: 12,
                capacity: 10
            }
        );
    }

    #[test]
    fn test_route_feasible_after_waiting() {
        let inst = tight_instance();
        assert!(is_route_feasible(&inst, &[3, 1]));
        assert!(is_route_feasible(&inst, &[2]));
    }

    #[test]
    fn test_valid_iff_coverage_and_zero_penalties() {
        let inst = tight_instance();
        let eval = FitnessEvaluator::new(&inst);
        let genomes = [
            Genome::new(vec![vec![3, 1], vec![2]]),
            Genome::new(vec![vec![1, 3], vec![2]]),
            Genome::new(vec![vec![3, 2, 1], vec![]]),
            Genome::new(vec![vec![3, 1], vec![]]),
        ];
        for g in &genomes {
            let covered = g.num_visits() == inst.num_clients();
            let clean = eval.evaluate(g).penalties.is_zero();
            assert_eq!(is_solution_valid(&inst, g), covered && clean, "{g:?}");
        }
    }
}
