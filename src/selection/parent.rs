//! Parent selection.

use super::roulette::roulette_indices;
use crate::error::{Result, SolverError};
use crate::models::Individual;
use crate::random::RandomSource;

/// Strategy for choosing the mating pool.
///
/// Fitness is higher-is-better.
///
/// # Examples
///
/// ```
/// use care_routing::selection::ParentSelection;
///
/// let sel = ParentSelection::Tournament { size: 3, probability: 0.8 };
/// assert_eq!(sel.name(), "tournament");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParentSelection {
    /// Fitness-proportionate sampling with replacement.
    ///
    /// # Complexity
    /// O(n) per selection
    RouletteWheel,

    /// Draw `size` contestants uniformly with replacement; with
    /// `probability` the fittest wins, otherwise a uniform pick among the
    /// other `size − 1` contestants.
    ///
    /// # Complexity
    /// O(size) per selection
    Tournament {
        /// Contestants per tournament (≥ 1).
        size: usize,
        /// Chance the fittest contestant wins, in `[0, 1]`.
        probability: f64,
    },
}

impl ParentSelection {
    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RouletteWheel => "roulette_wheel",
            Self::Tournament { .. } => "tournament",
        }
    }

    /// Indices of `count` parents, drawn with replacement.
    ///
    /// # Errors
    ///
    /// [`SolverError::Precondition`] if the population is empty.
    pub fn select<R: RandomSource + ?Sized>(
        &self,
        population: &[Individual],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        if population.is_empty() {
            return Err(SolverError::precondition(self.name(), "empty population"));
        }
        Ok(match *self {
            Self::RouletteWheel => {
                let fitnesses: Vec<f64> = population.iter().map(Individual::fitness).collect();
                roulette_indices(&fitnesses, count, rng)
            }
            Self::Tournament { size, probability } => (0..count)
                .map(|_| tournament(population, size, probability, rng))
                .collect(),
        })
    }
}

fn tournament<R: RandomSource + ?Sized>(
    population: &[Individual],
    size: usize,
    probability: f64,
    rng: &mut R,
) -> usize {
    let size = size.max(1);
    let contestants: Vec<usize> = (0..size).map(|_| rng.index(population.len())).collect();

    let mut winner = 0;
    for (slot, &idx) in contestants.iter().enumerate().skip(1) {
        if population[idx].fitness() > population[contestants[winner]].fitness() {
            winner = slot;
        }
    }

    if size == 1 || rng.unit() < probability {
        return contestants[winner];
    }
    let mut other = rng.index(size - 1);
    if other >= winner {
        other += 1;
    }
    contestants[other]
}
