//! Shared instance fixtures for unit tests.

use crate::distance::TravelTimes;
use crate::models::{Client, ClientId, Depot, Position, ProblemInstance, TimeWindow};

fn wide(id: ClientId, demand: u32, service: f64, position: Position) -> Client {
    let tw = TimeWindow::new(0.0, 1000.0).expect("valid window");
    Client::new(id, demand, tw, service, position)
}

/// Four clients on the x-axis at 1, 2, 3, 4; two workers; nothing binds.
pub(crate) fn line_instance() -> ProblemInstance {
    let positions: Vec<Position> = (0..=4).map(|x| Position::new(x as f64, 0.0)).collect();
    let clients = (1..=4).map(|id| wide(id, 1, 0.0, positions[id])).collect();
    ProblemInstance::new(
        "line",
        2,
        10,
        8.0,
        Depot::new(positions[0], 1000.0),
        clients,
        TravelTimes::from_positions(&positions),
    )
    .expect("valid instance")
}

/// Three clients, two workers, capacity 10, depot closes at 25.
///
/// | id | demand | window   | service |
/// |----|--------|----------|---------|
/// | 1  | 4      | [10, 20] | 5       |
/// | 2  | 4      | [0, 20]  | 5       |
/// | 3  | 4      | [0, 12]  | 5       |
///
/// Travel: d(0,1)=1, d(0,2)=1, d(0,3)=2, d(1,2)=1, d(1,3)=2, d(2,3)=1.
pub(crate) fn tight_instance() -> ProblemInstance {
    let rows = vec![
        vec![0.0, 1.0, 1.0, 2.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![1.0, 1.0, 0.0, 1.0],
        vec![2.0, 2.0, 1.0, 0.0],
    ];
    let at = Position::default();
    let window = |s, e| TimeWindow::new(s, e).expect("valid window");
    let clients = vec![
        Client::new(1, 4, window(10.0, 20.0), 5.0, at),
        Client::new(2, 4, window(0.0, 20.0), 5.0, at),
        Client::new(3, 4, window(0.0, 12.0), 5.0, at),
    ];
    ProblemInstance::new(
        "tight",
        2,
        10,
        6.0,
        Depot::new(at, 25.0),
        clients,
        TravelTimes::from_rows(rows).expect("square"),
    )
    .expect("valid instance")
}

/// `n` clients on a 5-wide grid with loose windows and ample capacity.
pub(crate) fn grid_instance(n: usize, workers: usize) -> ProblemInstance {
    let mut positions = vec![Position::new(0.0, 0.0)];
    positions.extend((0..n).map(|i| {
        Position::new((i % 5) as f64 * 3.0 + 1.0, (i / 5) as f64 * 3.0 + 1.0)
    }));
    let clients = (1..=n).map(|id| wide(id, 1, 1.0, positions[id])).collect();
    ProblemInstance::new(
        "grid",
        workers,
        n as u32,
        10.0 * n as f64,
        Depot::new(positions[0], 1000.0),
        clients,
        TravelTimes::from_positions(&positions),
    )
    .expect("valid instance")
}
