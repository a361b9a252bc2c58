//! Domain model types for home-care routing.
//!
//! Clients with demands and time windows, the depot, the immutable problem
//! instance, and the search-side representation: a [`Genome`] of per-worker
//! routes and the scored [`Individual`].

mod client;
mod genome;
mod individual;
mod instance;

pub use client::{Client, ClientId, Position, TimeWindow};
pub use genome::{Genome, Route};
pub use individual::{best_index, Individual, Population};
pub use instance::{Depot, ProblemInstance};
