//! Mutation of bit strings and bounded real vectors.

use rand::Rng;
use rand_distr::StandardNormal;

use super::Mutator;

/// Flips each bit independently with probability `p`.
///
/// # Panics
/// Panics if `p` is not in `[0, 1]`.
pub fn bit_flip<R: Rng>(p: f64, v: &[bool], rng: &mut R) -> Vec<bool> {
    v.iter().map(|&b| if rng.random_bool(p) { !b } else { b }).collect()
}

/// Applies additive noise to each component with probability `p`.
///
/// A perturbed value outside `[min, max]` is discarded and the original
/// component kept.
pub fn convolve<R, N>(v: &[f64], p: f64, min: f64, max: f64, rng: &mut R, mut noise: N) -> Vec<f64>
where
    R: Rng,
    N: FnMut(&mut R) -> f64,
{
    v.iter()
        .map(|&x| {
            if rng.random_bool(p) {
                let y = x + noise(rng);
                if (min..=max).contains(&y) {
                    return y;
                }
            }
            x
        })
        .collect()
}

/// Bounded uniform convolution: noise drawn from `[-r, r]`.
pub fn bounded_uniform_convolution<R: Rng>(
    v: &[f64],
    p: f64,
    r: f64,
    min: f64,
    max: f64,
    rng: &mut R,
) -> Vec<f64> {
    let r = r.abs();
    convolve(v, p, min, max, rng, |rng| rng.random_range(-r..=r))
}

/// Gaussian convolution: noise drawn from `N(0, sigma^2)`.
pub fn gaussian_convolution<R: Rng>(
    v: &[f64],
    p: f64,
    sigma: f64,
    min: f64,
    max: f64,
    rng: &mut R,
) -> Vec<f64> {
    convolve(v, p, min, max, rng, |rng| {
        let z: f64 = rng.sample(StandardNormal);
        z * sigma
    })
}

/// [`bit_flip`] as a [`Mutator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitFlip {
    pub p: f64,
}

impl Mutator<Vec<bool>> for BitFlip {
    fn mutate<R: Rng>(&self, candidate: &Vec<bool>, rng: &mut R) -> Vec<bool> {
        bit_flip(self.p.clamp(0.0, 1.0), candidate, rng)
    }
}

/// [`bounded_uniform_convolution`] as a [`Mutator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedUniformConvolution {
    pub p: f64,
    pub r: f64,
    pub min: f64,
    pub max: f64,
}

impl Mutator<Vec<f64>> for BoundedUniformConvolution {
    fn mutate<R: Rng>(&self, candidate: &Vec<f64>, rng: &mut R) -> Vec<f64> {
        bounded_uniform_convolution(candidate, self.p.clamp(0.0, 1.0), self.r, self.min, self.max, rng)
    }
}

/// [`gaussian_convolution`] as a [`Mutator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianConvolution {
    pub p: f64,
    pub sigma: f64,
    pub min: f64,
    pub max: f64,
}

impl Mutator<Vec<f64>> for GaussianConvolution {
    fn mutate<R: Rng>(&self, candidate: &Vec<f64>, rng: &mut R) -> Vec<f64> {
        gaussian_convolution(candidate, self.p.clamp(0.0, 1.0), self.sigma, self.min, self.max, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_bit_flip_extremes() {
        let mut rng = create_rng(42);
        let v = vec![true, false, false, true, true];
        assert_eq!(bit_flip(0.0, &v, &mut rng), v);
        let flipped: Vec<bool> = v.iter().map(|b| !b).collect();
        assert_eq!(bit_flip(1.0, &v, &mut rng), flipped);
    }

    #[test]
    fn test_bit_flip_rate() {
        let mut rng = create_rng(1);
        let v = vec![false; 10_000];
        let ones = bit_flip(0.1, &v, &mut rng).into_iter().filter(|&b| b).count();
        assert!((800..1200).contains(&ones), "got {ones}");
    }

    #[test]
    fn test_convolution_stays_in_bounds() {
        let mut rng = create_rng(3);
        let v = vec![0.0, 0.5, 1.0, 0.99, 0.01];
        for _ in 0..200 {
            let u = bounded_uniform_convolution(&v, 1.0, 0.3, 0.0, 1.0, &mut rng);
            assert!(u.iter().all(|x| (0.0..=1.0).contains(x)));
            let g = gaussian_convolution(&v, 1.0, 0.5, 0.0, 1.0, &mut rng);
            assert!(g.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn test_out_of_bounds_keeps_original() {
        let mut rng = create_rng(3);
        // noise is always +10, never inside [0, 1]
        let v = vec![0.2, 0.8];
        let out = convolve(&v, 1.0, 0.0, 1.0, &mut rng, |_| 10.0);
        assert_eq!(out, v);
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = create_rng(3);
        let v = vec![0.2, 0.8, 0.4];
        let m = GaussianConvolution { p: 0.0, sigma: 1.0, min: 0.0, max: 1.0 };
        assert_eq!(m.mutate(&v, &mut rng), v);
    }

    proptest! {
        #[test]
        fn prop_bit_flip_extremes(v in prop::collection::vec(any::<bool>(), 0..64), seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            prop_assert_eq!(BitFlip { p: 0.0 }.mutate(&v, &mut rng), v.clone());
            let all = BitFlip { p: 1.0 }.mutate(&v, &mut rng);
            prop_assert!(all.iter().zip(&v).all(|(a, b)| a != b));
        }
    }
}
