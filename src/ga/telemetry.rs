//! Per-generation statistics and where they go.

use crate::evaluation::is_solution_valid;
use crate::models::{Individual, ProblemInstance};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Summary of one population.
///
/// Generation 0 is the seeded population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number.
    pub generation: usize,
    /// Highest fitness.
    pub best_fitness: f64,
    /// Mean fitness.
    pub average_fitness: f64,
    /// Lowest fitness.
    pub worst_fitness: f64,
    /// Share of strictly feasible individuals, in percent.
    pub feasible_percent: f64,
    /// Travel time of the fittest individual.
    pub best_travel_time: f64,
}

impl GenerationStats {
    /// Summarises `population`. Returns `None` if it is empty.
    ///
    /// # Complexity
    /// O(n · N) for the feasibility checks
    pub fn compute(
        generation: usize,
        population: &[Individual],
        instance: &ProblemInstance,
    ) -> Option<Self> {
        let first = population.first()?;
        let mut best = first;
        let mut worst = first.fitness();
        let mut sum = 0.0;
        let mut feasible = 0usize;
        for ind in population {
            let f = ind.fitness();
            if f > best.fitness() {
                best = ind;
            }
            worst = worst.min(f);
            sum += f;
            if is_solution_valid(instance, ind.genome()) {
                feasible += 1;
            }
        }
        let n = population.len() as f64;
        Some(Self {
            generation,
            best_fitness: best.fitness(),
            average_fitness: sum / n,
            worst_fitness: worst,
            feasible_percent: feasible as f64 / n * 100.0,
            best_travel_time: best.travel_time(),
        })
    }
}

/// Receives statistics after seeding and after every generation.
pub trait GenerationSink {
    /// Called once per generation, in order.
    fn record(&mut self, stats: &GenerationStats);
}

/// Collects the whole history.
impl GenerationSink for Vec<GenerationStats> {
    fn record(&mut self, stats: &GenerationStats) {
        self.push(*stats);
    }
}

/// Emits one `info` event per generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl GenerationSink for TracingSink {
    fn record(&mut self, stats: &GenerationStats) {
        info!(
            generation = stats.generation,
            best = stats.best_fitness,
            average = stats.average_fitness,
            worst = stats.worst_fitness,
            feasible_percent = stats.feasible_percent,
            travel_time = stats.best_travel_time,
            "generation complete"
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl GenerationSink for NullSink {
    fn record(&mut self, _stats: &GenerationStats) {}
}
