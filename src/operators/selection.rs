//! Parent selection.
//!
//! All functions take a fitness slice where **higher is better** and
//! return indices into it.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection Algorithm"

use rand::seq::index;
use rand::Rng;

use super::Selector;
use crate::random::shuffle;

/// Built-in selection strategies.
///
/// # Examples
///
/// ```
/// use metaheur::operators::{Selection, Selector};
/// use metaheur::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let fitness = [1.0, 9.0, 3.0];
/// let idx = Selection::Tournament(3).select(&fitness, &mut rng);
/// assert!(idx < fitness.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Roulette wheel over cumulative fitness.
    ///
    /// Negative fitness values get zero weight. When every weight is zero
    /// the draw is uniform.
    FitnessProportionate,

    /// Stochastic universal sampling: one random offset, evenly spaced
    /// pointers. Same expectation as roulette with lower variance when
    /// several parents are drawn at once.
    StochasticUniversal,

    /// `k` uniform draws with replacement; the fittest wins.
    Tournament(usize),

    /// `k` uniform draws without replacement within one tournament.
    TournamentWithExtraction(usize),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(2)
    }
}

impl Selector for Selection {
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");
        match *self {
            Selection::FitnessProportionate | Selection::StochasticUniversal => {
                fitness_proportionate_selection(fitness, rng)
            }
            Selection::Tournament(k) => tournament_selection(fitness, k, rng),
            Selection::TournamentWithExtraction(k) => {
                tournament_selection_with_extraction(fitness, k, rng)
            }
        }
    }

    fn select_many<R: Rng>(&self, fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        assert!(!fitness.is_empty(), "cannot select from empty population");
        match *self {
            Selection::StochasticUniversal => stochastic_universal_sampling(fitness, count, rng),
            _ => (0..count).map(|_| self.select(fitness, rng)).collect(),
        }
    }
}

/// Roulette weights: negative fitness clamps to zero, all-zero becomes uniform.
///
/// Weights are scaled by the largest one, so each lies in `[0, 1]` and their
/// sum stays finite for any finite fitness.
fn roulette_weights(fitness: &[f64]) -> Vec<f64> {
    let weights: Vec<f64> = fitness
        .iter()
        .map(|&f| if f.is_finite() && f > 0.0 { f } else { 0.0 })
        .collect();
    let max = weights.iter().copied().fold(0.0, f64::max);
    if max == 0.0 {
        vec![1.0; fitness.len()]
    } else {
        weights.into_iter().map(|w| w / max).collect()
    }
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// # Complexity
/// O(n) per selection
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn fitness_proportionate_selection<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    assert!(n > 0, "cannot select from empty population");
    let weights = roulette_weights(fitness);
    let total: f64 = weights.iter().sum();

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    // floating-point fallback: last individual with positive weight
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(n - 1)
}

/// Stochastic universal sampling of `count` indices.
///
/// Uses a single offset in `[0, total / count)` and `count` pointers spaced
/// `total / count` apart. The result is shuffled so consecutive pairs are
/// not biased toward neighboring indices.
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn stochastic_universal_sampling<R: Rng>(
    fitness: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = fitness.len();
    assert!(n > 0, "cannot select from empty population");
    if count == 0 {
        return Vec::new();
    }

    let weights = roulette_weights(fitness);
    let total: f64 = weights.iter().sum();
    let step = total / count as f64;
    let offset = rng.random_range(0.0..step);

    let mut selected = Vec::with_capacity(count);
    let mut idx = 0;
    let mut cumulative = weights[0];
    for k in 0..count {
        let pointer = offset + k as f64 * step;
        while cumulative <= pointer && idx + 1 < n {
            idx += 1;
            cumulative += weights[idx];
        }
        selected.push(idx);
    }
    shuffle(&mut selected, rng);
    selected
}

/// Tournament selection with replacement.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament_selection<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let n = fitness.len();
    assert!(n > 0, "cannot select from empty population");

    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best] {
            best = idx;
        }
    }
    best
}

/// Tournament selection where each entrant is drawn at most once.
///
/// `k` is clamped to the population size, so with `k == n` every
/// individual competes exactly once and the fittest always wins.
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament_selection_with_extraction<R: Rng>(
    fitness: &[f64],
    k: usize,
    rng: &mut R,
) -> usize {
    let entrants = tournament_entrants(fitness.len(), k, rng);
    let mut best = entrants[0];
    for &idx in &entrants[1..] {
        if fitness[idx] > fitness[best] {
            best = idx;
        }
    }
    best
}

/// The distinct indices drawn for one tournament with extraction.
///
/// # Panics
/// Panics if `n` is zero.
pub fn tournament_entrants<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    assert!(n > 0, "cannot select from empty population");
    index::sample(rng, n, k.clamp(1, n)).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    #[test]
    fn test_roulette_dominant_individual() {
        let fitness = [1.0, 1.0, 1000.0, 1.0];
        let mut rng = create_rng(42);

        let n = 10_000;
        let hits = (0..n)
            .filter(|_| fitness_proportionate_selection(&fitness, &mut rng) == 2)
            .count();
        // expected share 1000/1003
        let share = hits as f64 / n as f64;
        assert!(share > 0.99, "dominant share {share}");
    }

    #[test]
    fn test_roulette_huge_fitness_does_not_overflow() {
        let fitness = [f64::MAX, f64::MAX];
        let mut rng = create_rng(42);
        let mut counts = [0u32; 2];
        for _ in 0..1000 {
            counts[fitness_proportionate_selection(&fitness, &mut rng)] += 1;
        }
        assert!(counts.iter().all(|&c| c > 300), "got {counts:?}");

        let picks = stochastic_universal_sampling(&fitness, 4, &mut rng);
        assert_eq!(picks.len(), 4);
        assert_eq!(picks.iter().filter(|&&i| i == 0).count(), 2);
    }

    #[test]
    fn test_roulette_weights_are_scaled() {
        let weights = roulette_weights(&[f64::MAX, -1.0, f64::MAX / 2.0]);
        assert_eq!(weights, vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_roulette_all_zero_is_uniform() {
        let fitness = [0.0; 4];
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..8000 {
            counts[fitness_proportionate_selection(&fitness, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1600, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let fitness = [-5.0, 0.0, 3.0];
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            assert_eq!(fitness_proportionate_selection(&fitness, &mut rng), 2);
        }
    }

    #[test]
    fn test_sus_expected_counts() {
        // weights 1:3 -> exactly 25 and 75 of 100 pointers
        let fitness = [1.0, 3.0];
        let mut rng = create_rng(3);
        let picks = stochastic_universal_sampling(&fitness, 100, &mut rng);
        assert_eq!(picks.len(), 100);
        let ones = picks.iter().filter(|&&i| i == 1).count();
        assert!((74..=76).contains(&ones), "got {ones}");
    }

    #[test]
    fn test_sus_zero_count() {
        let mut rng = create_rng(3);
        assert!(stochastic_universal_sampling(&[1.0], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_tournament_favors_best() {
        let fitness = [10.0, 5.0, 1.0, 8.0];
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        let n = 10_000;
        for _ in 0..n {
            counts[tournament_selection(&fitness, 4, &mut rng)] += 1;
        }
        assert!(counts[0] > 6000, "got {counts:?}");
    }

    #[test]
    fn test_tournament_size_one_is_uniform() {
        let fitness = [10.0, 5.0, 1.0, 8.0];
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[tournament_selection(&fitness, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_extraction_draws_distinct_entrants() {
        let mut rng = create_rng(11);
        for k in 1..=6 {
            let entrants = tournament_entrants(6, k, &mut rng);
            let unique: HashSet<usize> = entrants.iter().copied().collect();
            assert_eq!(unique.len(), entrants.len());
            assert_eq!(entrants.len(), k);
        }
    }

    #[test]
    fn test_extraction_full_tournament_always_best() {
        // every individual competes exactly once, so no repeats can hide the best
        let fitness = [3.0, 8.0, 1.0, 7.0, 2.0];
        let mut rng = create_rng(5);
        for _ in 0..500 {
            assert_eq!(tournament_selection_with_extraction(&fitness, 5, &mut rng), 1);
        }
    }

    #[test]
    fn test_extraction_clamps_k() {
        let fitness = [1.0, 2.0];
        let mut rng = create_rng(5);
        assert_eq!(tournament_selection_with_extraction(&fitness, 10, &mut rng), 1);
    }

    #[test]
    fn test_single_individual() {
        let mut rng = create_rng(42);
        for sel in [
            Selection::FitnessProportionate,
            Selection::StochasticUniversal,
            Selection::Tournament(3),
            Selection::TournamentWithExtraction(3),
        ] {
            assert_eq!(sel.select(&[5.0], &mut rng), 0);
            assert_eq!(sel.select_many(&[5.0], 3, &mut rng), vec![0, 0, 0]);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&[], &mut rng);
    }
}
