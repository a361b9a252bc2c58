//! Injected randomness.
//!
//! Every stochastic component takes a `&mut R` where `R: RandomSource`;
//! there is no global generator. Independent engines get independent
//! streams seeded from [`derive_seeds`].

use crate::models::ClientId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A stateful stream of uniform draws.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    ///
    /// Callers guarantee `low <= high`.
    fn int_inclusive(&mut self, low: usize, high: usize) -> usize;

    /// Uniform real in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Shuffles client ids in place.
    fn shuffle(&mut self, ids: &mut [ClientId]);

    /// Uniform index into a slice of length `len` (`len > 0`).
    fn index(&mut self, len: usize) -> usize {
        self.int_inclusive(0, len - 1)
    }
}

/// [`RandomSource`] backed by a seeded [`StdRng`].
///
/// # Examples
///
/// ```
/// use care_routing::random::{RandomSource, SeededSource};
///
/// let mut a = SeededSource::new(42);
/// let mut b = SeededSource::new(42);
/// assert_eq!(a.int_inclusive(0, 100), b.int_inclusive(0, 100));
/// ```
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Deterministic stream for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn int_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.random_range(low..=high)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn shuffle(&mut self, ids: &mut [ClientId]) {
        ids.shuffle(&mut self.rng);
    }
}

/// `count` seeds derived deterministically from `master`.
pub fn derive_seeds(master: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master);
    (0..count).map(|_| rng.random()).collect()
}

/// Replays fixed draws. Panics when a draw is out of range or the script runs out.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    ints: std::collections::VecDeque<usize>,
    reals: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(ints: &[usize], reals: &[f64]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            reals: reals.iter().copied().collect(),
        }
    }

    pub(crate) fn ints(ints: &[usize]) -> Self {
        Self::new(ints, &[])
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.ints.is_empty() && self.reals.is_empty()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn int_inclusive(&mut self, low: usize, high: usize) -> usize {
        let v = self.ints.pop_front().expect("scripted ints exhausted");
        assert!(low <= v && v <= high, "scripted {v} outside {low}..={high}");
        v
    }

    fn unit(&mut self) -> f64 {
        self.reals.pop_front().expect("scripted reals exhausted")
    }

    fn shuffle(&mut self, _ids: &mut [ClientId]) {}
}
