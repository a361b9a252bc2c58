//! Permutation crossover on flattened genomes.
//!
//! All operators concatenate the parents' routes in worker order, recombine
//! the resulting client sequences, and cut the child back into routes.
//!
//! - [`order1_with_cuts`] (OX): Davis (1985), keeps relative order
//! - [`pmx_with_cuts`] (PMX): Goldberg & Lingle (1985), keeps absolute position
//! - [`edge_recombination`] (ERX): Whitley et al. (1989), keeps adjacency
//! - [`CrossoverOperator`]: dispatch used by the engine

mod edge_recombination;
mod operator;
mod order1;
mod pmx;

pub use edge_recombination::edge_recombination;
pub use operator::{CrossoverOperator, Offspring};
pub use order1::order1_with_cuts;
pub use pmx::pmx_with_cuts;

use crate::models::ClientId;

/// One past the largest id in either parent; sizes id-indexed scratch tables.
fn id_bound(a: &[ClientId], b: &[ClientId]) -> usize {
    a.iter().chain(b).copied().max().map_or(0, |m| m + 1)
}
