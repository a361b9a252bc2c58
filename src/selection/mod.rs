//! Parent and survivor selection.
//!
//! - [`ParentSelection`]: roulette wheel or tournament, indices with replacement
//! - [`SurvivorSelection`]: full replacement, roulette replacement, elitism
//!
//! Both roulette variants share [`roulette_indices`], which shifts fitness by
//! its minimum plus [`ROULETTE_EPSILON`] so negative scores are usable.

mod parent;
mod roulette;
mod survivor;

pub use parent::ParentSelection;
pub use roulette::{roulette_indices, ROULETTE_EPSILON};
pub use survivor::SurvivorSelection;
