//! Reading instances and writing solutions.
//!
//! The solver core works on parsed [`ProblemInstance`](crate::models::ProblemInstance)
//! values and returns [`Individual`](crate::models::Individual)s; this module
//! converts between those and JSON.

mod export;
mod instance;

pub use export::SolutionReport;
pub use instance::{load_instance, parse_instance, read_instance};
