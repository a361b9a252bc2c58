//! Crossover dispatch over genomes.

use super::edge_recombination::edge_recombination;
use super::order1::order1_with_cuts;
use super::pmx::pmx_with_cuts;
use crate::error::{Result, SolverError};
use crate::models::{ClientId, Genome};
use crate::random::RandomSource;

/// Children of one crossover application.
#[derive(Debug, Clone, PartialEq)]
pub struct Offspring {
    /// Always present.
    pub first: Genome,
    /// Absent for operators that produce a single child.
    pub second: Option<Genome>,
}

/// Permutation crossover on flattened genomes.
///
/// Children are rebuilt with a parent's route-length profile: the first child
/// with the first parent's, the second with the second parent's.
///
/// # Examples
///
/// ```
/// use care_routing::crossover::CrossoverOperator;
/// use care_routing::models::Genome;
/// use care_routing::random::SeededSource;
///
/// let p1 = Genome::new(vec![vec![1, 2, 3], vec![4, 5]]);
/// let p2 = Genome::new(vec![vec![5], vec![3, 1, 4, 2]]);
/// let mut rng = SeededSource::new(9);
///
/// let kids = CrossoverOperator::Order1.apply(&p1, &p2, &mut rng).unwrap();
/// assert_eq!(kids.first.route_lengths(), vec![3, 2]);
/// assert_eq!(kids.second.unwrap().route_lengths(), vec![1, 4]);
///
/// let kids = CrossoverOperator::EdgeRecombination.apply(&p1, &p2, &mut rng).unwrap();
/// assert!(kids.second.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverOperator {
    /// Order-1 (OX).
    Order1,
    /// Partially mapped (PMX).
    PartiallyMapped,
    /// Edge recombination (ERX), one child.
    EdgeRecombination,
}

impl CrossoverOperator {
    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Order1 => "order1",
            Self::PartiallyMapped => "partially_mapped",
            Self::EdgeRecombination => "edge_recombination",
        }
    }

    /// Recombines two parents.
    ///
    /// # Errors
    ///
    /// [`SolverError::Precondition`] if the parents don't visit the same
    /// clients or have different numbers of workers.
    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        parent1: &Genome,
        parent2: &Genome,
        rng: &mut R,
    ) -> Result<Offspring> {
        let op = self.name();
        if parent1.num_workers() != parent2.num_workers() {
            return Err(SolverError::precondition(op, "parents differ in worker count"));
        }
        let flat1 = parent1.flatten();
        let flat2 = parent2.flatten();
        if !same_clients(&flat1, &flat2) {
            return Err(SolverError::precondition(op, "parents visit different clients"));
        }

        let n = flat1.len();
        let lengths1 = parent1.route_lengths();
        let rebuild = |flat: &[ClientId], lengths: &[usize]| {
            Genome::from_flat(flat, lengths)
                .ok_or_else(|| SolverError::precondition(op, "child length differs from parent"))
        };

        match self {
            Self::EdgeRecombination => Ok(Offspring {
                first: rebuild(&edge_recombination(&flat1, &flat2, rng), &lengths1)?,
                second: None,
            }),
            Self::Order1 | Self::PartiallyMapped if n < 2 => Ok(Offspring {
                first: parent1.clone(),
                second: Some(parent2.clone()),
            }),
            Self::Order1 | Self::PartiallyMapped => {
                let (start, end) = random_cuts(n, rng);
                let build: fn(&[ClientId], &[ClientId], usize, usize) -> Vec<ClientId> =
                    if *self == Self::Order1 {
                        order1_with_cuts
                    } else {
                        pmx_with_cuts
                    };
                Ok(Offspring {
                    first: rebuild(&build(&flat1, &flat2, start, end), &lengths1)?,
                    second: Some(rebuild(
                        &build(&flat2, &flat1, start, end),
                        &parent2.route_lengths(),
                    )?),
                })
            }
        }
    }
}

/// Two uniform cut indices, ordered.
fn random_cuts<R: RandomSource + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.index(n);
    let b = rng.index(n);
    (a.min(b), a.max(b))
}

fn same_clients(a: &[ClientId], b: &[ClientId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b && a.windows(2).all(|w| w[0] != w[1])
}
