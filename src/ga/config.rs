//! Engine configuration.
//!
//! [`EngineConfig`] holds everything one evolutionary run needs. It is built
//! in code with the `with_*` methods or resolved from a catalog
//! [`EngineSpec`](super::EngineSpec), and checked once by
//! [`validate`](EngineConfig::validate) before the first generation.

use crate::constructive::Initializer;
use crate::crossover::CrossoverOperator;
use crate::error::ConfigError;
use crate::evaluation::PenaltyWeights;
use crate::mutation::MutationOperator;
use crate::selection::{ParentSelection, SurvivorSelection};

/// An operator with its application rate.
///
/// A rate `r` applies the operator `⌈r × population_size⌉` times per
/// generation, to individuals chosen by index with replacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rated<T> {
    /// The operator.
    pub operator: T,
    /// Application rate in `(0, 1]`.
    pub rate: f64,
}

impl<T> Rated<T> {
    /// Pairs `operator` with `rate`.
    pub fn new(operator: T, rate: f64) -> Self {
        Self { operator, rate }
    }

    /// Applications per generation for a population of `population_size`.
    pub fn applications(&self, population_size: usize) -> usize {
        (self.rate * population_size as f64).ceil() as usize
    }
}

/// Configuration of an [`EvolutionEngine`](super::EvolutionEngine).
///
/// # Defaults
///
/// ```
/// use care_routing::ga::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 500);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use care_routing::crossover::CrossoverOperator;
/// use care_routing::ga::EngineConfig;
/// use care_routing::mutation::MutationOperator;
/// use care_routing::selection::{ParentSelection, SurvivorSelection};
///
/// let config = EngineConfig::default()
///     .with_population_size(50)
///     .with_generations(200)
///     .with_parent_selection(ParentSelection::RouletteWheel)
///     .with_crossover(CrossoverOperator::PartiallyMapped, 0.5)
///     .with_mutation(MutationOperator::TwoOpt, 0.05)
///     .with_survivor_selection(SurvivorSelection::RouletteWheelReplacement);
/// assert_eq!(config.crossovers.len(), 1);
/// assert_eq!(config.mutations.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Individuals per generation (≥ 2).
    pub population_size: usize,

    /// Generations to run (≥ 1). There is no other stopping rule.
    pub generations: usize,

    /// How generation zero is seeded.
    pub initializer: Initializer,

    /// Mating-pool selection.
    pub parent_selection: ParentSelection,

    /// Crossover passes, applied in order.
    pub crossovers: Vec<Rated<CrossoverOperator>>,

    /// Mutation passes, applied in order after crossover.
    pub mutations: Vec<Rated<MutationOperator>>,

    /// Next-generation selection.
    pub survivor_selection: SurvivorSelection,

    /// Penalty multipliers used by the fitness evaluator.
    pub penalty_weights: PenaltyWeights,
}

impl Default for EngineConfig {
    /// Feasible greedy seeding, 3-way tournament, order-1 crossover, a mix
    /// of perturbing and local-search mutations, 10% elitism.
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            initializer: Initializer::default(),
            parent_selection: ParentSelection::Tournament {
                size: 3,
                probability: 0.8,
            },
            crossovers: vec![Rated::new(CrossoverOperator::Order1, 0.6)],
            mutations: vec![
                Rated::new(MutationOperator::reassign_one(), 0.1),
                Rated::new(MutationOperator::SwapBetween, 0.1),
                Rated::new(MutationOperator::InsertWithin, 0.1),
                Rated::new(MutationOperator::TwoOpt, 0.05),
            ],
            survivor_selection: SurvivorSelection::elitism(
                0.1,
                SurvivorSelection::RouletteWheelReplacement,
            ),
            penalty_weights: PenaltyWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the initializer.
    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_parent_selection(mut self, selection: ParentSelection) -> Self {
        self.parent_selection = selection;
        self
    }

    /// Sets a single crossover pass, replacing any configured ones.
    ///
    /// Use [`then_crossover`](Self::then_crossover) to add further passes.
    pub fn with_crossover(mut self, operator: CrossoverOperator, rate: f64) -> Self {
        self.crossovers = vec![Rated::new(operator, rate)];
        self
    }

    /// Appends a crossover pass.
    pub fn then_crossover(mut self, operator: CrossoverOperator, rate: f64) -> Self {
        self.crossovers.push(Rated::new(operator, rate));
        self
    }

    /// Sets a single mutation pass, replacing any configured ones.
    ///
    /// Use [`then_mutation`](Self::then_mutation) to add further passes.
    pub fn with_mutation(mut self, operator: MutationOperator, rate: f64) -> Self {
        self.mutations = vec![Rated::new(operator, rate)];
        self
    }

    /// Appends a mutation pass.
    pub fn then_mutation(mut self, operator: MutationOperator, rate: f64) -> Self {
        self.mutations.push(Rated::new(operator, rate));
        self
    }

    /// Sets the survivor selection strategy.
    pub fn with_survivor_selection(mut self, selection: SurvivorSelection) -> Self {
        self.survivor_selection = selection;
        self
    }

    /// Sets the penalty weights.
    pub fn with_penalty_weights(mut self, weights: PenaltyWeights) -> Self {
        self.penalty_weights = weights;
        self
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }

        match self.initializer {
            Initializer::FeasibleGreedy { max_attempts: 0 } => {
                return Err(at_least_one(self.initializer.name(), "max_attempts"));
            }
            Initializer::FeasibleGreedy { .. } | Initializer::Random { .. } => {}
        }

        if let ParentSelection::Tournament { size, probability } = self.parent_selection {
            let name = self.parent_selection.name();
            if size == 0 {
                return Err(at_least_one(name, "tournament_size"));
            }
            if !(0.0..=1.0).contains(&probability) {
                return Err(ConfigError::InvalidParameter {
                    operator: name.into(),
                    parameter: "tournament_probability",
                    reason: format!("{probability} is outside [0, 1]"),
                });
            }
        }

        for c in &self.crossovers {
            check_rate(c.operator.name(), c.rate)?;
        }
        for m in &self.mutations {
            check_rate(m.operator.name(), m.rate)?;
            if let MutationOperator::ReassignOne { max_attempts: 0 } = m.operator {
                return Err(at_least_one(m.operator.name(), "max_attempts"));
            }
        }

        self.survivor_selection.validate()
    }
}

fn check_rate(operator: &str, rate: f64) -> Result<(), ConfigError> {
    if rate > 0.0 && rate <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate {
            operator: operator.into(),
            rate,
        })
    }
}

fn at_least_one(operator: &str, parameter: &'static str) -> ConfigError {
    ConfigError::InvalidParameter {
        operator: operator.into(),
        parameter,
        reason: "must be at least 1".into(),
    }
}
