//! Penalised fitness of a genome.

use crate::models::{ClientId, Genome, ProblemInstance};
use serde::{Deserialize, Serialize};

/// Multipliers applied to each penalty component.
///
/// They must be large enough that any feasible genome outranks any
/// infeasible one on the instances at hand.
///
/// # Examples
///
/// ```
/// use care_routing::evaluation::PenaltyWeights;
///
/// let w = PenaltyWeights::default();
/// assert_eq!(w.capacity, 1000.0);
/// assert_eq!(w.missed_care, 100.0);
/// assert_eq!(w.late_return, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Per unit of demand over capacity.
    pub capacity: f64,
    /// Per time unit a visit finishes after its window.
    pub missed_care: f64,
    /// Per time unit a worker is back after the depot deadline.
    pub late_return: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            capacity: 1000.0,
            missed_care: 100.0,
            late_return: 100.0,
        }
    }
}

/// Raw violation magnitudes, summed over the whole genome.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Penalties {
    /// Σ over routes of `max(0, load − capacity)`.
    pub capacity: f64,
    /// Σ over visits of `max(0, finish − window end)`.
    pub missed_care: f64,
    /// Σ over routes of `max(0, completion − return deadline)`.
    pub late_return: f64,
}

impl Penalties {
    /// Weighted sum of all components.
    pub fn weighted(&self, weights: &PenaltyWeights) -> f64 {
        weights.capacity * self.capacity
            + weights.missed_care * self.missed_care
            + weights.late_return * self.late_return
    }

    /// `true` when no constraint is violated.
    pub fn is_zero(&self) -> bool {
        self.capacity <= 0.0 && self.missed_care <= 0.0 && self.late_return <= 0.0
    }

    fn add(&mut self, other: &Penalties) {
        self.capacity += other.capacity;
        self.missed_care += other.missed_care;
        self.late_return += other.late_return;
    }
}

/// Score of one genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// `−travel_time − weighted penalties`; higher is better.
    pub fitness: f64,
    /// Driving time only, waiting and service excluded.
    pub travel_time: f64,
    /// Unweighted violation magnitudes.
    pub penalties: Penalties,
}

/// Timing and load of one simulated route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteTrace {
    /// Driving time including the return leg.
    pub travel_time: f64,
    /// Total demand served.
    pub load: u32,
    /// Clock when the worker is back at the depot (0 for an empty route).
    pub completion_time: f64,
    /// Violations of this route alone.
    pub penalties: Penalties,
}

/// Scores genomes against one instance.
///
/// Each route is simulated with a running clock starting at 0: drive, wait
/// for the window to open, serve, and finally drive back to the depot.
/// Lateness, overload and late return are accumulated, never overwritten.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::evaluation::FitnessEvaluator;
/// use care_routing::models::{Client, Depot, Genome, Position, ProblemInstance, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let positions = [Position::new(0.0, 0.0), Position::new(3.0, 4.0)];
/// let instance = ProblemInstance::new(
///     "one",
///     1,
///     10,
///     10.0,
///     Depot::new(positions[0], 100.0),
///     vec![Client::new(1, 1, tw, 5.0, positions[1])],
///     TravelTimes::from_positions(&positions),
/// )
/// .unwrap();
///
/// let evaluator = FitnessEvaluator::new(&instance);
/// let eval = evaluator.evaluate(&Genome::new(vec![vec![1]]));
/// assert!((eval.travel_time - 10.0).abs() < 1e-10);
/// assert!((eval.fitness + 10.0).abs() < 1e-10);
/// assert!(eval.penalties.is_zero());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    instance: &'a ProblemInstance,
    weights: PenaltyWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with the default penalty weights.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            weights: PenaltyWeights::default(),
        }
    }

    /// Replaces the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The instance being scored against.
    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    /// Active penalty weights.
    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Simulates one route.
    ///
    /// # Panics
    ///
    /// Panics if the route contains an id outside `1..=N`.
    pub fn simulate_route(&self, route: &[ClientId]) -> RouteTrace {
        let inst = self.instance;
        let mut trace = RouteTrace::default();
        let mut clock = 0.0;
        let mut prev = 0;

        for &id in route {
            let client = inst.client(id);
            let travel = inst.travel_time(prev, id);
            trace.travel_time += travel;
            let arrival = clock + travel;
            let start = arrival + client.window().waiting_time(arrival);
            let finish = start + client.service_duration();
            trace.penalties.missed_care += client.window().lateness(finish);
            trace.load += client.demand();
            clock = finish;
            prev = id;
        }

        if !route.is_empty() {
            let back = inst.travel_time(prev, 0);
            trace.travel_time += back;
            clock += back;
        }
        trace.completion_time = clock;
        trace.penalties.capacity = trace.load.saturating_sub(inst.capacity()) as f64;
        trace.penalties.late_return = (clock - inst.depot().return_deadline()).max(0.0);
        trace
    }

    /// Scores a genome.
    pub fn evaluate(&self, genome: &Genome) -> Evaluation {
        let mut travel_time = 0.0;
        let mut penalties = Penalties::default();
        for route in genome.routes() {
            let trace = self.simulate_route(route);
            travel_time += trace.travel_time;
            penalties.add(&trace.penalties);
        }
        Evaluation {
            fitness: -travel_time - penalties.weighted(&self.weights),
            travel_time,
            penalties,
        }
    }
}
