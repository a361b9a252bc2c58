//! Fitness-proportionate sampling.

use crate::random::RandomSource;

/// Added after shifting so the worst individual keeps a non-zero weight.
pub const ROULETTE_EPSILON: f64 = 1e-6;

/// Draws `count` indices with replacement, with probability proportional to
/// `fitness − min(fitness) + ε`.
///
/// Fitness here is higher-is-better and may be negative. Returns an empty
/// vector when `fitnesses` is empty.
///
/// # Complexity
///
/// O(n + count · n)
///
/// # Examples
///
/// ```
/// use care_routing::random::SeededSource;
/// use care_routing::selection::roulette_indices;
///
/// let mut rng = SeededSource::new(5);
/// let picks = roulette_indices(&[-100.0, -10.0, -1.0], 1000, &mut rng);
/// let best = picks.iter().filter(|&&i| i == 2).count();
/// let worst = picks.iter().filter(|&&i| i == 0).count();
/// assert!(best > worst);
/// ```
pub fn roulette_indices<R: RandomSource + ?Sized>(
    fitnesses: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = fitnesses.len();
    if n == 0 {
        return Vec::new();
    }
    let min = fitnesses.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| f - min + ROULETTE_EPSILON)
        .collect();
    let total: f64 = weights.iter().sum();

    (0..count)
        .map(|_| {
            let target = rng.unit() * total;
            let mut cumulative = 0.0;
            for (i, &w) in weights.iter().enumerate() {
                cumulative += w;
                if cumulative > target {
                    return i;
                }
            }
            // floating-point shortfall at the top of the wheel
            n - 1
        })
        .collect()
}
