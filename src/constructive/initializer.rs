//! Initial population construction.

use super::feasible_greedy::feasible_greedy;
use super::random_assign::random_assignment;
use crate::error::Result;
use crate::evaluation::FitnessEvaluator;
use crate::models::{Genome, Individual, Population, ProblemInstance};
use crate::random::RandomSource;

/// Default attempt budget for [`Initializer::FeasibleGreedy`].
pub const DEFAULT_CONSTRUCTION_ATTEMPTS: usize = 100;

/// How the first generation is seeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Initializer {
    /// Shuffle and deal out clients, ignoring constraints.
    Random {
        /// Round-robin instead of uniform worker choice.
        distribute_equally: bool,
    },
    /// Greedy cheapest feasible append, grouped by window end.
    FeasibleGreedy {
        /// Whole-genome retries before giving up.
        max_attempts: usize,
    },
}

impl Default for Initializer {
    fn default() -> Self {
        Self::FeasibleGreedy {
            max_attempts: DEFAULT_CONSTRUCTION_ATTEMPTS,
        }
    }
}

impl Initializer {
    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random { .. } => "random",
            Self::FeasibleGreedy { .. } => "feasible_greedy",
        }
    }

    /// Builds one genome.
    pub fn build_genome<R: RandomSource + ?Sized>(
        &self,
        instance: &ProblemInstance,
        rng: &mut R,
    ) -> Result<Genome> {
        match *self {
            Self::Random { distribute_equally } => {
                Ok(random_assignment(instance, distribute_equally, rng))
            }
            Self::FeasibleGreedy { max_attempts } => feasible_greedy(instance, max_attempts, rng),
        }
    }

    /// Builds and evaluates `size` individuals.
    pub fn populate<R: RandomSource + ?Sized>(
        &self,
        evaluator: &FitnessEvaluator<'_>,
        size: usize,
        rng: &mut R,
    ) -> Result<Population> {
        (0..size)
            .map(|_| {
                let genome = self.build_genome(evaluator.instance(), rng)?;
                Ok(Individual::evaluated(genome, evaluator))
            })
            .collect()
    }
}
