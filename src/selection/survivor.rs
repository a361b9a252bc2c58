//! Survivor selection.

use super::roulette::roulette_indices;
use crate::error::{ConfigError, Result};
use crate::models::{Individual, Population};
use crate::random::RandomSource;

/// Strategy for forming the next generation from parents and children.
///
/// # Examples
///
/// ```
/// use care_routing::selection::SurvivorSelection;
///
/// let elitism = SurvivorSelection::elitism(0.1, SurvivorSelection::RouletteWheelReplacement);
/// assert!(elitism.validate().is_ok());
///
/// let bad = SurvivorSelection::elitism(0.1, SurvivorSelection::FullReplacement);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SurvivorSelection {
    /// Children replace the parents; their number must equal the target size.
    FullReplacement,

    /// Roulette-sample the merged parents and children down to the target size.
    RouletteWheelReplacement,

    /// Keep the top `⌊fraction × target⌋` of the merged pool, fill the rest
    /// with `fill` applied to the same merged pool.
    Elitism {
        /// Share of the target size kept unconditionally, in `[0, 1]`.
        fraction: f64,
        /// Strategy for the remaining slots.
        fill: Box<SurvivorSelection>,
    },
}

impl SurvivorSelection {
    /// Elitism with the given fill strategy.
    pub fn elitism(fraction: f64, fill: SurvivorSelection) -> Self {
        Self::Elitism {
            fraction,
            fill: Box::new(fill),
        }
    }

    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullReplacement => "full_replacement",
            Self::RouletteWheelReplacement => "roulette_wheel_replacement",
            Self::Elitism { .. } => "elitism",
        }
    }

    /// Rejects an out-of-range elitism fraction or a full-replacement fill.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::FullReplacement | Self::RouletteWheelReplacement => Ok(()),
            Self::Elitism { fraction, fill } => {
                if !(0.0..=1.0).contains(fraction) {
                    return Err(ConfigError::InvalidParameter {
                        operator: self.name().into(),
                        parameter: "elitism_fraction",
                        reason: format!("{fraction} is outside [0, 1]"),
                    });
                }
                if **fill == Self::FullReplacement {
                    return Err(ConfigError::InvalidElitismFill);
                }
                fill.validate()
            }
        }
    }

    /// Picks `target` survivors.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ChildCountMismatch`] for full replacement when
    /// `children.len() != target`.
    pub fn select<R: RandomSource + ?Sized>(
        &self,
        parents: Population,
        children: Population,
        target: usize,
        rng: &mut R,
    ) -> Result<Population> {
        match self {
            Self::FullReplacement => {
                if children.len() != target {
                    return Err(ConfigError::ChildCountMismatch {
                        expected: target,
                        actual: children.len(),
                    }
                    .into());
                }
                Ok(children)
            }
            Self::RouletteWheelReplacement => {
                let pool = merge(parents, children);
                let fitnesses: Vec<f64> = pool.iter().map(Individual::fitness).collect();
                Ok(roulette_indices(&fitnesses, target, rng)
                    .into_iter()
                    .map(|i| pool[i].clone())
                    .collect())
            }
            Self::Elitism { fraction, fill } => {
                let mut pool = merge(parents, children);
                pool.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
                let elite = ((fraction * target as f64).floor() as usize)
                    .min(target)
                    .min(pool.len());
                let mut survivors: Population = pool[..elite].to_vec();
                let rest = target - elite;
                if rest > 0 {
                    survivors.extend(fill.select(pool, Vec::new(), rest, rng)?);
                }
                Ok(survivors)
            }
        }
    }
}

fn merge(mut parents: Population, children: Population) -> Population {
    parents.extend(children);
    parents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use crate::evaluation::FitnessEvaluator;
    use crate::models::Genome;
    use crate::random::{ScriptedSource, SeededSource};
    use crate::test_support::line_instance;

    fn individuals(routes: &[[&[usize]; 2]]) -> Population {
        let inst = line_instance();
        let eval = FitnessEvaluator::new(&inst);
        routes
            .iter()
            .map(|[a, b]| Individual::evaluated(Genome::new(vec![a.to_vec(), b.to_vec()]), &eval))
            .collect()
    }

    /// Travel 12 and 16.
    fn parents() -> Population {
        individuals(&[[&[1, 2], &[3, 4]], [&[4, 1, 3], &[2]]])
    }

    /// Travel 8 and 14.
    fn children() -> Population {
        individuals(&[[&[1, 2, 3, 4], &[]], [&[1, 3], &[2, 4]]])
    }

    fn travel(pop: &[Individual]) -> Vec<f64> {
        pop.iter().map(Individual::travel_time).collect()
    }

    #[test]
    fn test_full_replacement() {
        let mut rng = ScriptedSource::default();
        let next = SurvivorSelection::FullReplacement
            .select(parents(), children(), 2, &mut rng)
            .expect("sizes match");
        assert_eq!(next, children());
    }

    #[test]
    fn test_full_replacement_size_mismatch() {
        let mut rng = ScriptedSource::default();
        let err = SurvivorSelection::FullReplacement
            .select(parents(), children(), 3, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::Config(ConfigError::ChildCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_roulette_replacement_draws_from_merged_pool() {
        // merged fitness -12, -16, -8, -14 → weights ≈ 4, 0, 8, 2 (total ≈ 14)
        let mut rng = ScriptedSource::new(&[], &[0.1, 0.5, 0.95]);
        let next = SurvivorSelection::RouletteWheelReplacement
            .select(parents(), children(), 3, &mut rng)
            .expect("selects");
        assert_eq!(travel(&next), vec![12.0, 8.0, 14.0]);
    }

    #[test]
    fn test_elitism_keeps_best() {
        let sel = SurvivorSelection::elitism(0.5, SurvivorSelection::RouletteWheelReplacement);
        // elites: floor(0.5 × 2) = 1 → travel 8; fill draws from the sorted pool
        // (8, 12, 14, 16) with weights ≈ 8, 4, 2, 0
        let mut rng = ScriptedSource::new(&[], &[0.7]);
        let next = sel
            .select(parents(), children(), 2, &mut rng)
            .expect("selects");
        assert_eq!(travel(&next), vec![8.0, 12.0]);
    }

    #[test]
    fn test_elitism_full_fraction() {
        let sel = SurvivorSelection::elitism(1.0, SurvivorSelection::RouletteWheelReplacement);
        let mut rng = ScriptedSource::default();
        let next = sel
            .select(parents(), children(), 3, &mut rng)
            .expect("selects");
        assert_eq!(travel(&next), vec![8.0, 12.0, 14.0]);
    }

    #[test]
    fn test_best_survives_elitism() {
        let sel = SurvivorSelection::elitism(0.1, SurvivorSelection::RouletteWheelReplacement);
        let mut rng = SeededSource::new(9);
        for _ in 0..20 {
            let next = sel
                .select(parents(), children(), 10, &mut rng)
                .expect("selects");
            assert_eq!(next.len(), 10);
            assert!((next[0].travel_time() - 8.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_validate() {
        assert!(SurvivorSelection::FullReplacement.validate().is_ok());
        assert_eq!(
            SurvivorSelection::elitism(0.2, SurvivorSelection::FullReplacement).validate(),
            Err(ConfigError::InvalidElitismFill)
        );
        assert!(matches!(
            SurvivorSelection::elitism(1.5, SurvivorSelection::RouletteWheelReplacement)
                .validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
        let nested = SurvivorSelection::elitism(
            0.1,
            SurvivorSelection::elitism(0.2, SurvivorSelection::FullReplacement),
        );
        assert_eq!(nested.validate(), Err(ConfigError::InvalidElitismFill));
    }
}
