//! The generational loop.
//!
//! ```text
//! Seeding → [SelectingParents → Recombining → Mutating → SelectingSurvivors] × generations → Terminated
//! ```
//!
//! Every new genome is evaluated as soon as it is produced, so the
//! population never holds a stale score.

use super::config::EngineConfig;
use super::telemetry::{GenerationSink, GenerationStats, NullSink};
use crate::error::{ConfigError, Result, SolverError};
use crate::evaluation::{is_solution_valid, BenchmarkComparison, FitnessEvaluator};
use crate::models::{best_index, Individual, Population, ProblemInstance};
use crate::random::RandomSource;
use tracing::{debug, info, trace};

/// Stage of a generation, used to tag log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Seeding,
    SelectingParents,
    Recombining,
    Mutating,
    SelectingSurvivors,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Self::Seeding => "seeding",
            Self::SelectingParents => "selecting_parents",
            Self::Recombining => "recombining",
            Self::Mutating => "mutating",
            Self::SelectingSurvivors => "selecting_survivors",
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Fittest individual of the final population.
    pub best: Individual,
    /// Generations executed.
    pub generations: usize,
    /// Whether `best` passes the strict feasibility check.
    pub feasible: bool,
    /// `best` against the instance benchmark.
    pub benchmark: BenchmarkComparison,
}

/// Genetic algorithm over one problem instance.
///
/// The engine owns no randomness; every run takes its own stream, so
/// independent runs can share an engine.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::ga::{EngineConfig, EvolutionEngine};
/// use care_routing::models::{Client, Depot, Position, ProblemInstance, TimeWindow};
/// use care_routing::random::SeededSource;
///
/// let tw = TimeWindow::new(0.0, 500.0).unwrap();
/// let positions = [(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (0.0, 3.0), (0.0, 6.0)];
/// let clients = (1..positions.len())
///     .map(|id| {
///         let (x, y) = positions[id];
///         Client::new(id, 1, tw, 2.0, Position::new(x, y))
///     })
///     .collect();
/// let travel = TravelTimes::from_positions(
///     &positions.iter().map(|&(x, y)| Position::new(x, y)).collect::<Vec<_>>(),
/// );
/// let instance = ProblemInstance::new(
///     "demo", 2, 10, 20.0, Depot::new(Position::new(0.0, 0.0), 500.0), clients, travel,
/// )
/// .unwrap();
///
/// let config = EngineConfig::default().with_population_size(10).with_generations(5);
/// let engine = EvolutionEngine::new(&instance, config).unwrap();
/// let result = engine.run(&mut SeededSource::new(7)).unwrap();
///
/// assert!(result.feasible);
/// assert_eq!(result.best.genome().num_visits(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine<'a> {
    instance: &'a ProblemInstance,
    config: EngineConfig,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> EvolutionEngine<'a> {
    /// Validates `config` and binds it to `instance`.
    pub fn new(instance: &'a ProblemInstance, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator = FitnessEvaluator::new(instance).with_weights(config.penalty_weights);
        Ok(Self {
            instance,
            config,
            evaluator,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The fitness evaluator, weighted as configured.
    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }

    /// Runs every generation without telemetry.
    pub fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<EvolutionResult> {
        self.run_with_sink(rng, &mut NullSink)
    }

    /// Runs every generation, reporting statistics to `sink` after seeding
    /// and after each generation.
    ///
    /// # Errors
    ///
    /// Seeding failures (e.g. [`SolverError::ConstructionExhausted`]) and any
    /// operator error other than a skipped, recoverable one.
    pub fn run_with_sink<R, S>(&self, rng: &mut R, sink: &mut S) -> Result<EvolutionResult>
    where
        R: RandomSource + ?Sized,
        S: GenerationSink + ?Sized,
    {
        info!(
            instance = self.instance.name(),
            clients = self.instance.num_clients(),
            workers = self.instance.num_workers(),
            population = self.config.population_size,
            generations = self.config.generations,
            "evolution started"
        );

        let mut population = self.seed(rng)?;
        self.report(0, &population, sink);

        for generation in 1..=self.config.generations {
            population = self.step(generation, population, rng)?;
            self.report(generation, &population, sink);
        }

        let best = best_index(&population)
            .map(|i| population.swap_remove(i))
            .ok_or_else(|| SolverError::precondition("evolution", "empty population"))?;
        let feasible = is_solution_valid(self.instance, best.genome());
        let benchmark = BenchmarkComparison::new(best.travel_time(), self.instance.benchmark());
        info!(
            fitness = best.fitness(),
            travel_time = best.travel_time(),
            feasible,
            benchmark = benchmark.benchmark,
            gap_percent = ?benchmark.percent_gap(),
            "evolution finished"
        );

        Ok(EvolutionResult {
            best,
            generations: self.config.generations,
            feasible,
            benchmark,
        })
    }

    /// Builds and evaluates generation zero.
    pub fn seed<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Population> {
        trace!(
            phase = Phase::Seeding.as_str(),
            initializer = self.config.initializer.name()
        );
        let population =
            self.config
                .initializer
                .populate(&self.evaluator, self.config.population_size, rng)?;
        let all_feasible = population
            .iter()
            .all(|ind| is_solution_valid(self.instance, ind.genome()));
        info!(
            initializer = self.config.initializer.name(),
            all_feasible, "initial population seeded"
        );
        Ok(population)
    }

    /// Runs one generation on `population` and returns its successor.
    pub fn step<R: RandomSource + ?Sized>(
        &self,
        generation: usize,
        population: Population,
        rng: &mut R,
    ) -> Result<Population> {
        let size = self.config.population_size;
        debug!(
            generation,
            average = mean_fitness(&population),
            "generation started"
        );

        trace!(generation, phase = Phase::SelectingParents.as_str());
        let parents: Population = self
            .config
            .parent_selection
            .select(&population, size, rng)?
            .into_iter()
            .map(|i| population[i].clone())
            .collect();
        debug!(generation, average = mean_fitness(&parents), "parents selected");

        let mut children = self.recombine(generation, &parents, rng)?;
        self.mutate(generation, &mut children, rng)?;
        debug!(generation, average = mean_fitness(&children), "offspring ready");

        trace!(generation, phase = Phase::SelectingSurvivors.as_str());
        self.config
            .survivor_selection
            .select(population, children, size, rng)
    }

    /// Crossover passes. Children start as a copy of the parents and each
    /// application overwrites the slots of the two parents it read.
    fn recombine<R: RandomSource + ?Sized>(
        &self,
        generation: usize,
        parents: &[Individual],
        rng: &mut R,
    ) -> Result<Population> {
        trace!(generation, phase = Phase::Recombining.as_str());
        let mut children = parents.to_vec();
        let n = parents.len();
        if n < 2 {
            return Ok(children);
        }

        for rated in &self.config.crossovers {
            let op = rated.operator;
            for _ in 0..rated.applications(n) {
                let first = rng.index(n);
                let mut second = rng.index(n - 1);
                if second >= first {
                    second += 1;
                }
                match op.apply(parents[first].genome(), parents[second].genome(), rng) {
                    Ok(offspring) => {
                        children[first] = Individual::evaluated(offspring.first, &self.evaluator);
                        if let Some(genome) = offspring.second {
                            children[second] = Individual::evaluated(genome, &self.evaluator);
                        }
                    }
                    Err(e) if e.is_recoverable() => {
                        trace!(generation, operator = op.name(), error = %e, "crossover skipped");
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(children)
    }

    /// Mutation passes, in configured order, on individuals drawn with replacement.
    fn mutate<R: RandomSource + ?Sized>(
        &self,
        generation: usize,
        children: &mut [Individual],
        rng: &mut R,
    ) -> Result<()> {
        trace!(generation, phase = Phase::Mutating.as_str());
        let n = children.len();
        if n == 0 {
            return Ok(());
        }

        for rated in &self.config.mutations {
            let op = rated.operator;
            for _ in 0..rated.applications(n) {
                let idx = rng.index(n);
                let mut genome = children[idx].genome().clone();
                match op.apply(&mut genome, self.instance, rng) {
                    Ok(()) => children[idx] = Individual::evaluated(genome, &self.evaluator),
                    Err(e) if e.is_recoverable() => {
                        trace!(generation, operator = op.name(), error = %e, "mutation skipped");
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    fn report<S: GenerationSink + ?Sized>(
        &self,
        generation: usize,
        population: &[Individual],
        sink: &mut S,
    ) {
        if let Some(stats) = GenerationStats::compute(generation, population, self.instance) {
            sink.record(&stats);
        }
    }
}

fn mean_fitness(population: &[Individual]) -> f64 {
    if population.is_empty() {
        return f64::NAN;
    }
    population.iter().map(Individual::fitness).sum::<f64>() / population.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::Initializer;
    use crate::crossover::CrossoverOperator;
    use crate::evaluation::check_genome;
    use crate::mutation::MutationOperator;
    use crate::random::SeededSource;
    use crate::selection::{ParentSelection, SurvivorSelection};
    use crate::test_support::{grid_instance, tight_instance};

    fn small_config() -> EngineConfig {
        EngineConfig::default()
            .with_population_size(16)
            .with_generations(12)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let inst = grid_instance(5, 2);
        assert_eq!(
            EvolutionEngine::new(&inst, EngineConfig::default().with_population_size(1)).err(),
            Some(ConfigError::PopulationTooSmall(1))
        );
    }

    #[test]
    fn test_run_returns_feasible_cover() {
        let inst = grid_instance(12, 3);
        let engine = EvolutionEngine::new(&inst, small_config()).expect("valid config");
        let result = engine.run(&mut SeededSource::new(5)).expect("runs");

        assert_eq!(result.generations, 12);
        assert!(result.feasible);
        assert_eq!(check_genome(&inst, result.best.genome()), Ok(()));
        assert!((result.benchmark.travel_time - result.best.travel_time()).abs() < 1e-10);
        assert!((result.benchmark.benchmark - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_history_with_elitism_never_regresses() {
        let inst = grid_instance(15, 4);
        let config = small_config()
            .with_initializer(Initializer::Random {
                distribute_equally: false,
            })
            .then_mutation(MutationOperator::SplitJourney, 0.1)
            .then_mutation(MutationOperator::InsertionHeuristic, 0.05);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        let mut history: Vec<GenerationStats> = Vec::new();
        let result = engine
            .run_with_sink(&mut SeededSource::new(17), &mut history)
            .expect("runs");

        assert_eq!(history.len(), 13);
        assert!(history.iter().enumerate().all(|(i, s)| s.generation == i));
        for w in history.windows(2) {
            assert!(w[1].best_fitness >= w[0].best_fitness - 1e-9);
        }
        let last = history.last().expect("non-empty");
        assert!((last.best_fitness - result.best.fitness()).abs() < 1e-10);
        for s in &history {
            assert!(s.worst_fitness <= s.average_fitness + 1e-9);
            assert!(s.average_fitness <= s.best_fitness + 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let inst = grid_instance(10, 3);
        let config = small_config()
            .with_crossover(CrossoverOperator::EdgeRecombination, 0.3)
            .then_crossover(CrossoverOperator::PartiallyMapped, 0.3);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        let a = engine.run(&mut SeededSource::new(99)).expect("runs");
        let b = engine.run(&mut SeededSource::new(99)).expect("runs");
        assert_eq!(a, b);
    }

    #[test]
    fn test_inapplicable_operators_are_skipped() {
        // one worker: reassign, swap-between and split-journey never apply
        let inst = grid_instance(6, 1);
        let config = small_config()
            .with_mutation(MutationOperator::reassign_one(), 1.0)
            .then_mutation(MutationOperator::SwapBetween, 1.0)
            .then_mutation(MutationOperator::SplitJourney, 1.0)
            .then_mutation(MutationOperator::SwapWithin, 0.5);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        let result = engine.run(&mut SeededSource::new(3)).expect("runs");
        assert_eq!(result.best.genome().num_visits(), 6);
    }

    #[test]
    fn test_full_replacement_keeps_size() {
        let inst = grid_instance(8, 2);
        let config = small_config()
            .with_parent_selection(ParentSelection::RouletteWheel)
            .with_survivor_selection(SurvivorSelection::FullReplacement);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        let mut rng = SeededSource::new(21);
        let mut population = engine.seed(&mut rng).expect("seeds");
        for generation in 1..=5 {
            population = engine
                .step(generation, population, &mut rng)
                .expect("steps");
            assert_eq!(population.len(), 16);
            for ind in &population {
                let mut flat = ind.genome().flatten();
                flat.sort_unstable();
                assert_eq!(flat, (1..=8).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_tight_instance_finds_feasible() {
        let inst = tight_instance();
        let config = EngineConfig::default()
            .with_population_size(10)
            .with_generations(5);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        let result = engine.run(&mut SeededSource::new(4)).expect("runs");
        assert!(result.feasible);
        assert!(result.best.penalties().is_zero());
    }

    #[test]
    fn test_scores_use_configured_weights() {
        let inst = tight_instance();
        let weights = crate::evaluation::PenaltyWeights {
            capacity: 1.0,
            missed_care: 2.0,
            late_return: 3.0,
        };
        let config = EngineConfig::default()
            .with_population_size(4)
            .with_generations(1)
            .with_penalty_weights(weights);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        assert_eq!(engine.evaluator().weights(), &weights);
    }
}
