//! Random vector generation and `[f64]` arithmetic.
//!
//! The arithmetic helpers let a `Vec<f64>` problem implement
//! [`VectorSpace`](crate::problem::VectorSpace) with one-line methods.

use rand::Rng;

/// Random real vector with component `i` drawn uniformly from `[min[i], max[i])`.
///
/// A component whose bounds coincide takes that value.
///
/// # Panics
/// Panics if `min` and `max` differ in length or `min[i] > max[i]`.
pub fn random_vector<R: Rng>(min: &[f64], max: &[f64], rng: &mut R) -> Vec<f64> {
    assert_eq!(min.len(), max.len(), "bounds must have equal length");
    min.iter()
        .zip(max)
        .map(|(&lo, &hi)| {
            assert!(lo <= hi, "lower bound {lo} exceeds upper bound {hi}");
            if lo == hi {
                lo
            } else {
                rng.random_range(lo..hi)
            }
        })
        .collect()
}

/// Random bit vector of length `len`, each bit set with probability 1/2.
pub fn random_bit_vector<R: Rng>(len: usize, rng: &mut R) -> Vec<bool> {
    (0..len).map(|_| rng.random_bool(0.5)).collect()
}

/// Component-wise `a + b`.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Component-wise `a - b`.
pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Scalar multiple `k * v`.
pub fn scale(k: f64, v: &[f64]) -> Vec<f64> {
    v.iter().map(|x| k * x).collect()
}

/// Each component multiplied by an independent coefficient from `[0, bound]`.
pub fn random_scale<R: Rng>(v: &[f64], bound: f64, rng: &mut R) -> Vec<f64> {
    let bound = bound.abs();
    v.iter().map(|x| rng.random_range(0.0..=bound) * x).collect()
}

/// Euclidean norm.
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Euclidean distance.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

/// Number of positions at which two sequences differ.
pub fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count() + a.len().abs_diff(b.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_vector_bounds() {
        let mut rng = create_rng(1);
        let min = [0.0, -5.0, 2.0];
        let max = [1.0, 5.0, 2.0];
        for _ in 0..100 {
            let v = random_vector(&min, &max, &mut rng);
            assert!((0.0..1.0).contains(&v[0]));
            assert!((-5.0..5.0).contains(&v[1]));
            assert_eq!(v[2], 2.0);
        }
    }

    #[test]
    #[should_panic(expected = "exceeds upper bound")]
    fn test_random_vector_inverted_bounds() {
        random_vector(&[1.0], &[0.0], &mut create_rng(1));
    }

    #[test]
    fn test_random_bit_vector_balance() {
        let mut rng = create_rng(2);
        let ones = random_bit_vector(10_000, &mut rng).into_iter().filter(|&b| b).count();
        assert!((4_700..5_300).contains(&ones), "got {ones}");
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(add(&[1.0, 2.0], &[3.0, 4.0]), vec![4.0, 6.0]);
        assert_eq!(sub(&[1.0, 2.0], &[3.0, 4.0]), vec![-2.0, -2.0]);
        assert_eq!(scale(2.0, &[1.0, -1.0]), vec![2.0, -2.0]);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(hamming(&[1, 2, 3], &[1, 0, 3, 4]), 2);
    }

    #[test]
    fn test_random_scale_bounded() {
        let mut rng = create_rng(4);
        let v = vec![1.0; 50];
        let s = random_scale(&v, 0.5, &mut rng);
        assert!(s.iter().all(|x| (0.0..=0.5).contains(x)));
        // independent per component
        assert!(s.windows(2).any(|w| w[0] != w[1]));
    }
}
