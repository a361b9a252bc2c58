//! Population seeding heuristics.
//!
//! - [`random_assignment`]: shuffle and deal clients out, constraints ignored, O(n)
//! - [`feasible_greedy`]: cheapest feasible append by window end, with bounded retries, O(n·m·L)
//! - [`Initializer`]: the seeding choice carried by the engine configuration

mod feasible_greedy;
mod initializer;
mod random_assign;

pub use feasible_greedy::feasible_greedy;
pub use initializer::{Initializer, DEFAULT_CONSTRUCTION_ATTEMPTS};
pub use random_assign::random_assignment;
