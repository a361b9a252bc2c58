//! Genome scoring and feasibility.
//!
//! - [`FitnessEvaluator`]: continuous, penalised score used to rank genomes
//!   during search, infeasible ones included
//! - [`check_genome`] / [`is_solution_valid`]: strict yes/no checks used
//!   for reporting and for gating constructive moves
//! - [`BenchmarkComparison`]: gap to the instance's reference travel time

mod benchmark;
mod evaluator;
mod feasibility;

pub use benchmark::BenchmarkComparison;
pub use evaluator::{Evaluation, FitnessEvaluator, Penalties, PenaltyWeights, RouteTrace};
pub use feasibility::{
    check_genome, check_route, is_route_feasible, is_solution_valid, Infeasibility,
};
