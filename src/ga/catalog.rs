//! Name-based operator catalog.
//!
//! An [`EngineSpec`] is the serialisable form of an engine configuration:
//! operators are referred to by name and carry loosely typed parameters.
//! [`EngineSpec::resolve`] maps names onto enum variants and parameters onto
//! typed fields once, so nothing is looked up by string during a run.
//!
//! | Section | Names | Parameters |
//! |---|---|---|
//! | initializer | `random` | `distribute_equally` (flag, default false) |
//! | | `feasible_greedy` | `max_attempts` (int, default 100) |
//! | parent selection | `roulette_wheel` | |
//! | | `tournament` | `tournament_size` (int), `tournament_probability` (real), both required |
//! | crossover | `order1`, `partially_mapped`, `edge_recombination` | |
//! | mutation | `reassign_one` | `max_attempts` (int, default 100) |
//! | | `swap_within`, `swap_between`, `insert_within`, `two_opt`, `split_journey`, `insertion_heuristic` | |
//! | survivor selection | `full_replacement`, `roulette_wheel_replacement` | |
//! | | `elitism` | `elitism_fraction` (real, required), `fill` (text, default `roulette_wheel_replacement`) |
//!
//! Crossover and mutation entries also need a `rate`.

use super::config::{EngineConfig, Rated};
use crate::constructive::{Initializer, DEFAULT_CONSTRUCTION_ATTEMPTS};
use crate::crossover::CrossoverOperator;
use crate::error::{ConfigError, Result};
use crate::evaluation::PenaltyWeights;
use crate::mutation::{MutationOperator, DEFAULT_REASSIGN_ATTEMPTS};
use crate::selection::{ParentSelection, SurvivorSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// A loosely typed operator parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean switch.
    Flag(bool),
    /// Whole number.
    Int(i64),
    /// Real number.
    Real(f64),
    /// Free text, e.g. the name of another operator.
    Text(String),
}

/// One operator reference in an [`EngineSpec`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatorSpec {
    /// Catalog name.
    pub name: String,

    /// Application rate; required for crossover and mutation entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    /// Named parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,
}

impl OperatorSpec {
    /// An operator without rate or parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the application rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Adds a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    fn params(&self) -> Params<'_> {
        Params {
            operator: &self.name,
            values: &self.params,
        }
    }

    fn required_rate(&self) -> Result<f64, ConfigError> {
        self.rate.ok_or_else(|| ConfigError::MissingParameter {
            operator: self.name.clone(),
            parameter: "rate",
        })
    }
}

/// Serialisable engine configuration.
///
/// # Examples
///
/// ```
/// use care_routing::ga::EngineSpec;
///
/// let spec = EngineSpec::from_json(r#"{
///     "population_size": 30,
///     "generations": 10,
///     "parent_selection": {
///         "name": "tournament",
///         "params": { "tournament_size": 3, "tournament_probability": 0.9 }
///     },
///     "crossover": [ { "name": "order1", "rate": 0.5 } ],
///     "mutation": [ { "name": "two_opt", "rate": 0.1 } ],
///     "survivor_selection": {
///         "name": "elitism",
///         "params": { "elitism_fraction": 0.1 }
///     }
/// }"#).unwrap();
///
/// let config = spec.resolve().unwrap();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.survivor_selection.name(), "elitism");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Individuals per generation.
    pub population_size: usize,

    /// Generations to run.
    pub generations: usize,

    /// Seeding strategy; feasible greedy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<OperatorSpec>,

    /// Parent selection.
    pub parent_selection: OperatorSpec,

    /// Crossover passes in order.
    #[serde(default)]
    pub crossover: Vec<OperatorSpec>,

    /// Mutation passes in order.
    #[serde(default)]
    pub mutation: Vec<OperatorSpec>,

    /// Survivor selection.
    pub survivor_selection: OperatorSpec,

    /// Penalty multipliers; the defaults when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_weights: Option<PenaltyWeights>,
}

impl EngineSpec {
    /// Parses an [`EngineSpec`] from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an [`EngineSpec`] from a JSON stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Resolves names and parameters into a validated [`EngineConfig`].
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for unknown names, missing or mistyped parameters,
    /// and anything [`EngineConfig::validate`] rejects.
    pub fn resolve(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            population_size: self.population_size,
            generations: self.generations,
            initializer: match &self.initializer {
                Some(spec) => resolve_initializer(spec)?,
                None => Initializer::default(),
            },
            parent_selection: resolve_parent_selection(&self.parent_selection)?,
            crossovers: self
                .crossover
                .iter()
                .map(|spec| -> Result<_, ConfigError> {
                    Ok(Rated::new(resolve_crossover(spec)?, spec.required_rate()?))
                })
                .collect::<Result<_, ConfigError>>()?,
            mutations: self
                .mutation
                .iter()
                .map(|spec| -> Result<_, ConfigError> {
                    Ok(Rated::new(resolve_mutation(spec)?, spec.required_rate()?))
                })
                .collect::<Result<_, ConfigError>>()?,
            survivor_selection: resolve_survivor_selection(&self.survivor_selection)?,
            penalty_weights: self.penalty_weights.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

fn unknown(kind: &'static str, spec: &OperatorSpec) -> ConfigError {
    ConfigError::UnknownOperator {
        kind,
        name: spec.name.clone(),
    }
}

fn resolve_initializer(spec: &OperatorSpec) -> Result<Initializer, ConfigError> {
    let params = spec.params();
    match spec.name.as_str() {
        "random" => Ok(Initializer::Random {
            distribute_equally: params.flag("distribute_equally")?.unwrap_or(false),
        }),
        "feasible_greedy" => Ok(Initializer::FeasibleGreedy {
            max_attempts: params
                .count("max_attempts")?
                .unwrap_or(DEFAULT_CONSTRUCTION_ATTEMPTS),
        }),
        _ => Err(unknown("initializer", spec)),
    }
}

fn resolve_parent_selection(spec: &OperatorSpec) -> Result<ParentSelection, ConfigError> {
    let params = spec.params();
    match spec.name.as_str() {
        "roulette_wheel" => Ok(ParentSelection::RouletteWheel),
        "tournament" => Ok(ParentSelection::Tournament {
            size: params.required(params.count("tournament_size")?, "tournament_size")?,
            probability: params.required(
                params.real("tournament_probability")?,
                "tournament_probability",
            )?,
        }),
        _ => Err(unknown("parent selection", spec)),
    }
}

fn resolve_crossover(spec: &OperatorSpec) -> Result<CrossoverOperator, ConfigError> {
    match spec.name.as_str() {
        "order1" => Ok(CrossoverOperator::Order1),
        "partially_mapped" => Ok(CrossoverOperator::PartiallyMapped),
        "edge_recombination" => Ok(CrossoverOperator::EdgeRecombination),
        _ => Err(unknown("crossover", spec)),
    }
}

fn resolve_mutation(spec: &OperatorSpec) -> Result<MutationOperator, ConfigError> {
    match spec.name.as_str() {
        "reassign_one" => Ok(MutationOperator::ReassignOne {
            max_attempts: spec
                .params()
                .count("max_attempts")?
                .unwrap_or(DEFAULT_REASSIGN_ATTEMPTS),
        }),
        "swap_within" => Ok(MutationOperator::SwapWithin),
        "swap_between" => Ok(MutationOperator::SwapBetween),
        "insert_within" => Ok(MutationOperator::InsertWithin),
        "two_opt" => Ok(MutationOperator::TwoOpt),
        "split_journey" => Ok(MutationOperator::SplitJourney),
        "insertion_heuristic" => Ok(MutationOperator::InsertionHeuristic),
        _ => Err(unknown("mutation", spec)),
    }
}

fn resolve_survivor_selection(spec: &OperatorSpec) -> Result<SurvivorSelection, ConfigError> {
    let params = spec.params();
    match spec.name.as_str() {
        "full_replacement" => Ok(SurvivorSelection::FullReplacement),
        "roulette_wheel_replacement" => Ok(SurvivorSelection::RouletteWheelReplacement),
        "elitism" => {
            let fraction = params.required(params.real("elitism_fraction")?, "elitism_fraction")?;
            let fill = match params.text("fill")? {
                Some(name) => resolve_survivor_selection(&OperatorSpec::named(name))?,
                None => SurvivorSelection::RouletteWheelReplacement,
            };
            Ok(SurvivorSelection::elitism(fraction, fill))
        }
        _ => Err(unknown("survivor selection", spec)),
    }
}

/// Typed access to an operator's parameter map.
struct Params<'a> {
    operator: &'a str,
    values: &'a BTreeMap<String, ParamValue>,
}

impl Params<'_> {
    fn mistyped(&self, parameter: &'static str, expected: &'static str) -> ConfigError {
        ConfigError::MistypedParameter {
            operator: self.operator.into(),
            parameter,
            expected,
        }
    }

    fn required<T>(&self, value: Option<T>, parameter: &'static str) -> Result<T, ConfigError> {
        value.ok_or_else(|| ConfigError::MissingParameter {
            operator: self.operator.into(),
            parameter,
        })
    }

    fn flag(&self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Flag(b)) => Ok(Some(*b)),
            Some(_) => Err(self.mistyped(key, "a boolean")),
        }
    }

    /// Non-negative integer.
    fn count(&self, key: &'static str) -> Result<Option<usize>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Int(i)) => usize::try_from(*i).map(Some).map_err(|_| {
                ConfigError::InvalidParameter {
                    operator: self.operator.into(),
                    parameter: key,
                    reason: format!("{i} is negative"),
                }
            }),
            Some(_) => Err(self.mistyped(key, "an integer")),
        }
    }

    /// Real number; integers are widened.
    fn real(&self, key: &'static str) -> Result<Option<f64>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Real(x)) => Ok(Some(*x)),
            Some(ParamValue::Int(i)) => Ok(Some(*i as f64)),
            Some(_) => Err(self.mistyped(key, "a number")),
        }
    }

    fn text(&self, key: &'static str) -> Result<Option<&str>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Text(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.mistyped(key, "a string")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    fn base() -> EngineSpec {
        EngineSpec {
            population_size: 10,
            generations: 5,
            initializer: None,
            parent_selection: OperatorSpec::named("roulette_wheel"),
            crossover: vec![OperatorSpec::named("partially_mapped").with_rate(0.5)],
            mutation: vec![OperatorSpec::named("reassign_one").with_rate(0.2)],
            survivor_selection: OperatorSpec::named("full_replacement"),
            penalty_weights: None,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = base().resolve().expect("resolves");
        assert_eq!(config.initializer, Initializer::default());
        assert_eq!(config.parent_selection, ParentSelection::RouletteWheel);
        assert_eq!(
            config.crossovers,
            vec![Rated::new(CrossoverOperator::PartiallyMapped, 0.5)]
        );
        assert_eq!(
            config.mutations,
            vec![Rated::new(MutationOperator::reassign_one(), 0.2)]
        );
        assert_eq!(config.survivor_selection, SurvivorSelection::FullReplacement);
        assert_eq!(config.penalty_weights, PenaltyWeights::default());
    }

    #[test]
    fn test_from_json_all_sections() {
        let spec = EngineSpec::from_json(
            r#"{
                "population_size": 12,
                "generations": 3,
                "initializer": { "name": "random", "params": { "distribute_equally": true } },
                "parent_selection": {
                    "name": "tournament",
                    "params": { "tournament_size": 4, "tournament_probability": 1 }
                },
                "crossover": [
                    { "name": "edge_recombination", "rate": 0.3 },
                    { "name": "order1", "rate": 0.2 }
                ],
                "mutation": [
                    { "name": "reassign_one", "rate": 0.1, "params": { "max_attempts": 7 } },
                    { "name": "split_journey", "rate": 0.05 },
                    { "name": "insertion_heuristic", "rate": 0.01 }
                ],
                "survivor_selection": {
                    "name": "elitism",
                    "params": { "elitism_fraction": 0.25, "fill": "roulette_wheel_replacement" }
                },
                "penalty_weights": { "capacity": 500.0, "missed_care": 50.0, "late_return": 10.0 }
            }"#,
        )
        .expect("parses");
        let config = spec.resolve().expect("resolves");

        assert_eq!(
            config.initializer,
            Initializer::Random {
                distribute_equally: true
            }
        );
        // integer accepted for a real parameter
        assert_eq!(
            config.parent_selection,
            ParentSelection::Tournament {
                size: 4,
                probability: 1.0
            }
        );
        assert_eq!(config.crossovers.len(), 2);
        assert_eq!(
            config.mutations[0].operator,
            MutationOperator::ReassignOne { max_attempts: 7 }
        );
        assert_eq!(
            config.survivor_selection,
            SurvivorSelection::elitism(0.25, SurvivorSelection::RouletteWheelReplacement)
        );
        assert!((config.penalty_weights.capacity - 500.0).abs() < 1e-12);
    }

    #[test]
    fn test_tournament_requires_both_params() {
        let mut spec = base();
        spec.parent_selection = OperatorSpec::named("tournament")
            .with_param("tournament_probability", ParamValue::Real(0.8));
        assert_eq!(
            spec.resolve(),
            Err(ConfigError::MissingParameter {
                operator: "tournament".into(),
                parameter: "tournament_size",
            })
        );

        spec.parent_selection =
            OperatorSpec::named("tournament").with_param("tournament_size", ParamValue::Int(3));
        assert_eq!(
            spec.resolve(),
            Err(ConfigError::MissingParameter {
                operator: "tournament".into(),
                parameter: "tournament_probability",
            })
        );
    }

    #[test]
    fn test_mistyped_parameter() {
        let mut spec = base();
        spec.parent_selection = OperatorSpec::named("tournament")
            .with_param("tournament_size", ParamValue::Real(2.5))
            .with_param("tournament_probability", ParamValue::Real(0.8));
        assert_eq!(
            spec.resolve(),
            Err(ConfigError::MistypedParameter {
                operator: "tournament".into(),
                parameter: "tournament_size",
                expected: "an integer",
            })
        );

        let mut spec = base();
        spec.initializer = Some(
            OperatorSpec::named("random")
                .with_param("distribute_equally", ParamValue::Text("yes".into())),
        );
        assert!(matches!(
            spec.resolve(),
            Err(ConfigError::MistypedParameter { .. })
        ));
    }

    #[test]
    fn test_negative_count() {
        let mut spec = base();
        spec.mutation = vec![OperatorSpec::named("reassign_one")
            .with_rate(0.1)
            .with_param("max_attempts", ParamValue::Int(-1))];
        assert!(matches!(
            spec.resolve(),
            Err(ConfigError::InvalidParameter {
                parameter: "max_attempts",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_operator() {
        let mut spec = base();
        spec.crossover = vec![OperatorSpec::named("cycle").with_rate(0.5)];
        assert_eq!(
            spec.resolve(),
            Err(ConfigError::UnknownOperator {
                kind: "crossover",
                name: "cycle".into(),
            })
        );
    }

    #[test]
    fn test_missing_rate() {
        let mut spec = base();
        spec.mutation = vec![OperatorSpec::named("two_opt")];
        assert_eq!(
            spec.resolve(),
            Err(ConfigError::MissingParameter {
                operator: "two_opt".into(),
                parameter: "rate",
            })
        );
    }

    #[test]
    fn test_elitism_fill() {
        let mut spec = base();
        spec.survivor_selection = OperatorSpec::named("elitism")
            .with_param("elitism_fraction", ParamValue::Real(0.1))
            .with_param("fill", ParamValue::Text("full_replacement".into()));
        assert_eq!(spec.resolve(), Err(ConfigError::InvalidElitismFill));

        spec.survivor_selection = OperatorSpec::named("elitism");
        assert!(matches!(
            spec.resolve(),
            Err(ConfigError::MissingParameter {
                parameter: "elitism_fraction",
                ..
            })
        ));
    }

    #[test]
    fn test_validation_runs_after_resolution() {
        let mut spec = base();
        spec.population_size = 1;
        assert_eq!(spec.resolve(), Err(ConfigError::PopulationTooSmall(1)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EngineSpec::from_json("{ \"population_size\": 3 "),
            Err(SolverError::Json(_))
        ));
    }
}
