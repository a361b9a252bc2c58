//! Mutation dispatch.

use super::insert::insert_within;
use super::insertion::insertion_heuristic;
use super::reassign::{reassign_one, DEFAULT_REASSIGN_ATTEMPTS};
use super::split::split_journey;
use super::swap::{swap_between, swap_within};
use super::two_opt::two_opt;
use crate::error::Result;
use crate::models::{Genome, ProblemInstance};
use crate::random::RandomSource;

/// The seven genome mutations.
///
/// Operators that need travel times or constraints read them from the
/// instance passed to [`apply`](Self::apply).
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::models::{Client, Depot, Genome, Position, ProblemInstance, TimeWindow};
/// use care_routing::mutation::MutationOperator;
/// use care_routing::random::SeededSource;
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let clients = (1..=4).map(|id| Client::new(id, 1, tw, 0.0, Position::default())).collect();
/// let instance = ProblemInstance::new(
///     "flat", 2, 10, 0.0, Depot::new(Position::default(), 100.0), clients, TravelTimes::new(5),
/// )
/// .unwrap();
///
/// let mut genome = Genome::new(vec![vec![1, 2, 3], vec![4]]);
/// let mut rng = SeededSource::new(1);
/// MutationOperator::SwapWithin.apply(&mut genome, &instance, &mut rng).unwrap();
/// assert_ne!(genome.route(0), &vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOperator {
    /// Move one client to another route.
    ReassignOne {
        /// Redraw budget for source and destination.
        max_attempts: usize,
    },
    /// Swap two clients of one route.
    SwapWithin,
    /// Swap one client each between two routes.
    SwapBetween,
    /// Move one client within its route.
    InsertWithin,
    /// 2-opt local search on every route longer than four clients.
    TwoOpt,
    /// Split a route at its longest edge onto an idle worker.
    SplitJourney,
    /// Rebuild the genome by cheapest feasible insertion.
    InsertionHeuristic,
}

impl MutationOperator {
    /// `ReassignOne` with the default retry budget.
    pub fn reassign_one() -> Self {
        Self::ReassignOne {
            max_attempts: DEFAULT_REASSIGN_ATTEMPTS,
        }
    }

    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReassignOne { .. } => "reassign_one",
            Self::SwapWithin => "swap_within",
            Self::SwapBetween => "swap_between",
            Self::InsertWithin => "insert_within",
            Self::TwoOpt => "two_opt",
            Self::SplitJourney => "split_journey",
            Self::InsertionHeuristic => "insertion_heuristic",
        }
    }

    /// Mutates `genome` in place.
    ///
    /// No-op outcomes (nothing to split, no improving 2-opt move, no feasible
    /// re-insertion) are `Ok`. The caller re-evaluates the genome.
    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        genome: &mut Genome,
        instance: &ProblemInstance,
        rng: &mut R,
    ) -> Result<()> {
        match *self {
            Self::ReassignOne { max_attempts } => reassign_one(genome, max_attempts, rng),
            Self::SwapWithin => swap_within(genome, rng),
            Self::SwapBetween => swap_between(genome, rng),
            Self::InsertWithin => insert_within(genome, rng),
            Self::TwoOpt => {
                two_opt(genome, instance.travel_times());
                Ok(())
            }
            Self::SplitJourney => split_journey(genome, instance.travel_times(), rng).map(|_| ()),
            Self::InsertionHeuristic => {
                insertion_heuristic(genome, instance);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededSource;
    use crate::test_support::grid_instance;

    fn all() -> [MutationOperator; 7] {
        [
            MutationOperator::reassign_one(),
            MutationOperator::SwapWithin,
            MutationOperator::SwapBetween,
            MutationOperator::InsertWithin,
            MutationOperator::TwoOpt,
            MutationOperator::SplitJourney,
            MutationOperator::InsertionHeuristic,
        ]
    }

    #[test]
    fn test_names_are_distinct() {
        let mut names: Vec<_> = all().iter().map(MutationOperator::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_every_operator_preserves_clients() {
        let inst = grid_instance(14, 4);
        let mut rng = SeededSource::new(31);
        let mut g = Genome::new(vec![
            vec![3, 1, 14, 7, 9, 2],
            vec![5, 12],
            vec![],
            vec![4, 6, 8, 10, 11, 13],
        ]);
        for round in 0..20 {
            for op in all() {
                op.apply(&mut g, &inst, &mut rng)
                    .unwrap_or_else(|e| panic!("round {round}, {}: {e}", op.name()));
                let mut flat = g.flatten();
                flat.sort_unstable();
                assert_eq!(flat, (1..=14).collect::<Vec<_>>(), "{}", op.name());
                assert_eq!(g.num_workers(), 4);
            }
        }
    }
}
