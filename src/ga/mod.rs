//! Genetic algorithm for home-care routing.
//!
//! - [`EngineConfig`]: typed configuration with builder methods
//! - [`EngineSpec`]: the same configuration by operator name, resolved once
//! - [`EvolutionEngine`]: the generational loop
//! - [`GenerationSink`]: per-generation statistics ([`TracingSink`], `Vec<GenerationStats>`)
//! - [`run_attempts`]: independent seeded runs in parallel, best result wins
//!
//! # Reference
//!
//! Eiben, A.E. & Smith, J.E. (2015). *Introduction to Evolutionary
//! Computing*, 2nd ed., Springer.

mod attempts;
mod catalog;
mod config;
mod engine;
mod telemetry;

pub use attempts::run_attempts;
pub use catalog::{EngineSpec, OperatorSpec, ParamValue};
pub use config::{EngineConfig, Rated};
pub use engine::{EvolutionEngine, EvolutionResult};
pub use telemetry::{GenerationSink, GenerationStats, NullSink, TracingSink};
