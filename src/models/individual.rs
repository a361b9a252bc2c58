//! Scored candidate solutions.

use super::genome::Genome;
use crate::evaluation::{Evaluation, FitnessEvaluator, Penalties};

/// A genome together with its evaluation.
///
/// The genome is only reachable immutably, and the only way to build an
/// `Individual` is to evaluate a genome, so the cached score always matches
/// the genome it describes. To change a genome, take it out with
/// [`into_genome`](Self::into_genome) and evaluate the result again.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genome: Genome,
    evaluation: Evaluation,
}

impl Individual {
    /// Evaluates `genome` and wraps it.
    pub fn evaluated(genome: Genome, evaluator: &FitnessEvaluator<'_>) -> Self {
        let evaluation = evaluator.evaluate(&genome);
        Self { genome, evaluation }
    }

    /// The routes.
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Full score breakdown.
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Fitness; higher is better.
    pub fn fitness(&self) -> f64 {
        self.evaluation.fitness
    }

    /// Total travel time of all routes.
    pub fn travel_time(&self) -> f64 {
        self.evaluation.travel_time
    }

    /// Raw constraint-violation magnitudes.
    pub fn penalties(&self) -> &Penalties {
        &self.evaluation.penalties
    }

    /// Releases the genome, dropping the cached score.
    pub fn into_genome(self) -> Genome {
        self.genome
    }
}

/// Individuals of one generation. Order carries no meaning.
pub type Population = Vec<Individual>;

/// Index of the fittest individual; the first one wins ties.
///
/// Returns `None` for an empty slice.
pub fn best_index(population: &[Individual]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, ind) in population.iter().enumerate() {
        match best {
            Some((_, f)) if ind.fitness() <= f => {}
            _ => best = Some((i, ind.fitness())),
        }
    }
    best.map(|(i, _)| i)
}
