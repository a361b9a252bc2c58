//! # care-routing
//!
//! Genetic algorithm for home-care routing: a fixed team of workers leaves a
//! depot, visits every client once inside the client's time window without
//! exceeding worker capacity, and is back before the depot closes. The goal
//! is minimum total travel time.
//!
//! ## Modules
//!
//! - [`models`]: clients, depot, problem instance, genomes and scored individuals
//! - [`distance`]: travel-time matrix
//! - [`evaluation`]: penalised fitness, strict feasibility, benchmark gap
//! - [`constructive`]: population seeding (random, feasible greedy)
//! - [`crossover`]: order-1, PMX and edge recombination on flattened genomes
//! - [`mutation`]: perturbations and local search (2-opt, cheapest insertion)
//! - [`selection`]: parent and survivor selection
//! - [`ga`]: engine configuration, operator catalog, generational loop, parallel attempts
//! - [`random`]: injected random streams
//! - [`io`]: JSON instances and solution reports
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```no_run
//! use care_routing::ga::{run_attempts, EngineConfig};
//! use care_routing::io::{load_instance, SolutionReport};
//!
//! let instance = load_instance("train_0.json")?;
//! let config = EngineConfig::default().with_generations(1000);
//! let result = run_attempts(&instance, &config, 42, 4)?;
//! println!("{}", SolutionReport::from_result(&instance, &result).to_json()?);
//! # Ok::<(), care_routing::error::SolverError>(())
//! ```

pub mod constructive;
pub mod crossover;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod io;
pub mod models;
pub mod mutation;
pub mod random;
pub mod selection;

#[cfg(test)]
mod test_support;
