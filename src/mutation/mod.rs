//! Genome mutations.
//!
//! Random perturbations:
//!
//! - [`reassign_one`]: move a client to another worker, O(L)
//! - [`swap_within`] / [`swap_between`]: exchange two clients, O(m)
//! - [`insert_within`]: relocate a client inside its route, O(L)
//! - [`split_journey`]: hand the tail of a route to an idle worker, O(L)
//!
//! Local search:
//!
//! - [`two_opt`]: first-improvement 2-opt on every long route (Croes, 1958)
//! - [`insertion_heuristic`]: rebuild by cheapest feasible insertion
//!
//! Operators whose structural precondition fails (e.g. no route with two
//! clients) return [`SolverError::Precondition`](crate::error::SolverError::Precondition)
//! and leave the genome untouched.

mod insert;
mod insertion;
mod operator;
mod reassign;
mod split;
mod swap;
mod two_opt;

pub use insert::insert_within;
pub use insertion::insertion_heuristic;
pub use operator::MutationOperator;
pub use reassign::{reassign_one, DEFAULT_REASSIGN_ATTEMPTS};
pub use split::split_journey;
pub use swap::{swap_between, swap_within};
pub use two_opt::{two_opt, two_opt_route, TWO_OPT_MIN_ROUTE_LEN};
