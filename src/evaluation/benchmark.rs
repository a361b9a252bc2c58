//! Gap to the instance benchmark.

use serde::{Deserialize, Serialize};

/// How a solution's travel time compares to the instance benchmark.
///
/// # Examples
///
/// ```
/// use care_routing::evaluation::BenchmarkComparison;
///
/// let cmp = BenchmarkComparison::new(110.0, 100.0);
/// assert!((cmp.gap() - 10.0).abs() < 1e-10);
/// assert!((cmp.percent_gap().unwrap() - 10.0).abs() < 1e-10);
/// assert!(!cmp.beats_benchmark());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Travel time of the solution.
    pub travel_time: f64,
    /// Reference travel time.
    pub benchmark: f64,
}

impl BenchmarkComparison {
    /// Compares `travel_time` to `benchmark`.
    pub fn new(travel_time: f64, benchmark: f64) -> Self {
        Self {
            travel_time,
            benchmark,
        }
    }

    /// `travel_time − benchmark`; negative when the benchmark is beaten.
    pub fn gap(&self) -> f64 {
        self.travel_time - self.benchmark
    }

    /// Gap as a percentage of the benchmark.
    ///
    /// `None` when the benchmark is not positive.
    pub fn percent_gap(&self) -> Option<f64> {
        (self.benchmark > 0.0).then(|| self.gap() / self.benchmark * 100.0)
    }

    /// `true` if the solution is no longer than the benchmark.
    pub fn beats_benchmark(&self) -> bool {
        self.travel_time <= self.benchmark
    }
}
