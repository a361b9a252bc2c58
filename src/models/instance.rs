//! The immutable problem description.

use super::client::{Client, ClientId, Position};
use crate::distance::TravelTimes;
use crate::error::InstanceError;

/// The depot every worker starts from and returns to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Depot {
    position: Position,
    return_deadline: f64,
}

impl Depot {
    /// Creates a depot with the latest time workers may be back.
    pub fn new(position: Position, return_deadline: f64) -> Self {
        Self {
            position,
            return_deadline,
        }
    }

    /// Location.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Hard deadline for returning to the depot.
    pub fn return_deadline(&self) -> f64 {
        self.return_deadline
    }
}

/// A home-care routing instance.
///
/// Holds `N` clients with ids `1..=N`, a roster of identical workers, and
/// an `(N + 1) × (N + 1)` travel-time matrix whose index 0 is the depot.
/// Never mutated after construction.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::models::{Client, Depot, Position, ProblemInstance, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let clients = vec![
///     Client::new(1, 5, tw, 10.0, Position::new(1.0, 0.0)),
///     Client::new(2, 5, tw, 10.0, Position::new(2.0, 0.0)),
/// ];
/// let tt = TravelTimes::from_positions(&[
///     Position::new(0.0, 0.0),
///     Position::new(1.0, 0.0),
///     Position::new(2.0, 0.0),
/// ]);
/// let depot = Depot::new(Position::new(0.0, 0.0), 500.0);
/// let instance = ProblemInstance::new("tiny", 2, 10, 4.0, depot, clients, tt).unwrap();
/// assert_eq!(instance.num_clients(), 2);
/// assert_eq!(instance.client(2).demand(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    name: String,
    num_workers: usize,
    capacity: u32,
    benchmark: f64,
    depot: Depot,
    clients: Vec<Client>,
    travel_times: TravelTimes,
}

impl ProblemInstance {
    /// Validates and assembles an instance.
    ///
    /// Clients may be given in any order. Fails if there are no workers, if
    /// client ids are not exactly `1..=N`, or if the matrix is not
    /// `(N + 1) × (N + 1)`.
    pub fn new(
        name: impl Into<String>,
        num_workers: usize,
        capacity: u32,
        benchmark: f64,
        depot: Depot,
        mut clients: Vec<Client>,
        travel_times: TravelTimes,
    ) -> Result<Self, InstanceError> {
        if num_workers == 0 {
            return Err(InstanceError::NoWorkers);
        }
        let n = clients.len();
        clients.sort_by_key(Client::id);
        for (expected, client) in (1..=n).zip(&clients) {
            let id = client.id();
            if id == 0 || id > n {
                return Err(InstanceError::ClientIdOutOfRange { id, max: n });
            }
            if id != expected {
                // sorted ids in range with a gap imply a repeat
                return Err(InstanceError::DuplicateClient(id));
            }
        }
        if travel_times.size() != n + 1 {
            return Err(InstanceError::MatrixSize {
                expected: n + 1,
                actual: travel_times.size() * travel_times.size(),
            });
        }
        Ok(Self {
            name: name.into(),
            num_workers,
            capacity,
            benchmark,
            depot,
            clients,
            travel_times,
        })
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of workers (routes per genome).
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Per-worker capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Reference travel time for this instance.
    pub fn benchmark(&self) -> f64 {
        self.benchmark
    }

    /// The depot.
    pub fn depot(&self) -> &Depot {
        &self.depot
    }

    /// Number of clients `N`.
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// All clients in id order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Client ids `1..=N`.
    pub fn client_ids(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.iter().map(Client::id)
    }

    /// Looks up a client by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=N`.
    pub fn client(&self, id: ClientId) -> &Client {
        &self.clients[id - 1]
    }

    /// Looks up a client by id, returning `None` outside `1..=N`.
    pub fn try_client(&self, id: ClientId) -> Option<&Client> {
        id.checked_sub(1).and_then(|i| self.clients.get(i))
    }

    /// Travel time between two locations (0 = depot).
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.travel_times.get(from, to)
    }

    /// The full travel-time matrix.
    pub fn travel_times(&self) -> &TravelTimes {
        &self.travel_times
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn client(id: ClientId) -> Client {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        Client::new(id, 1, tw, 0.0, Position::default())
    }

    fn depot() -> Depot {
        Depot::new(Position::default(), 1000.0)
    }

    #[test]
    fn test_clients_sorted_by_id() {
        let inst = ProblemInstance::new(
            "t",
            1,
            10,
            0.0,
            depot(),
            vec![client(3), client(1), client(2)],
            TravelTimes::new(4),
        )
        .expect("valid");
        let ids: Vec<_> = inst.client_ids().collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(inst.client(3).id(), 3);
        assert!(inst.try_client(0).is_none());
        assert!(inst.try_client(4).is_none());
    }

    #[test]
    fn test_no_workers() {
        let err = ProblemInstance::new("t", 0, 10, 0.0, depot(), vec![], TravelTimes::new(1))
            .unwrap_err();
        assert_eq!(err, InstanceError::NoWorkers);
    }

    #[test]
    fn test_id_out_of_range() {
        let err = ProblemInstance::new(
            "t",
            1,
            10,
            0.0,
            depot(),
            vec![client(1), client(5)],
            TravelTimes::new(3),
        )
        .unwrap_err();
        assert_eq!(err, InstanceError::ClientIdOutOfRange { id: 5, max: 2 });
    }

    #[test]
    fn test_duplicate_id() {
        let err = ProblemInstance::new(
            "t",
            1,
            10,
            0.0,
            depot(),
            vec![client(1), client(1)],
            TravelTimes::new(3),
        )
        .unwrap_err();
        assert_eq!(err, InstanceError::DuplicateClient(1));
    }

    #[test]
    fn test_matrix_size_mismatch() {
        let err = ProblemInstance::new(
            "t",
            1,
            10,
            0.0,
            depot(),
            vec![client(1), client(2)],
            TravelTimes::new(2),
        )
        .unwrap_err();
        assert_eq!(
            err,
            InstanceError::MatrixSize {
                expected: 3,
                actual: 4
            }
        );
    }
}
