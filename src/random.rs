//! Random number plumbing shared by all runners.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seed used by single-state runners when none is configured.
pub(crate) const DEFAULT_SEED: u64 = 42;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates the runner RNG: seeded when `seed` is set, otherwise from `fallback`.
pub(crate) fn rng_from(seed: Option<u64>, fallback: impl FnOnce() -> u64) -> StdRng {
    create_rng(seed.unwrap_or_else(fallback))
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = create_rng(1);
        let mut v: Vec<usize> = (0..20).collect();
        shuffle(&mut v, &mut rng);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_rng_from_prefers_seed() {
        let mut a = rng_from(Some(3), || unreachable!());
        let mut b = create_rng(3);
        assert_eq!(a.random::<u32>(), b.random::<u32>());
    }
}
