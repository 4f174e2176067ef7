//! Crossover for fixed-length vectors of any gene type.
//!
//! # Operators
//!
//! - [`one_point_crossover`]: swap tails at a cut point
//! - [`n_point_crossover`]: alternate the donor parent at each cut
//! - [`uniform_crossover`]: swap each position independently
//! - [`uniform_crossover_many`]: shuffle columns across any number of parents

use rand::seq::index;
use rand::Rng;

use super::Crossover;
use crate::random::shuffle;

/// One-point crossover at cut `c`.
///
/// Returns `(v[..c] ++ w[c..], w[..c] ++ v[c..])`. A cut beyond a parent's
/// length is clamped to it. At a fixed `c` the operation is self-inverse.
///
/// ```
/// use metaheur::operators::crossover::one_point_crossover;
///
/// let (a, b) = one_point_crossover(&[1, 2, 3, 4, 5], &[6, 7, 8, 9, 10], 2);
/// assert_eq!(a, vec![1, 2, 8, 9, 10]);
/// assert_eq!(b, vec![6, 7, 3, 4, 5]);
/// ```
pub fn one_point_crossover<T: Clone>(v: &[T], w: &[T], c: usize) -> (Vec<T>, Vec<T>) {
    let cv = c.min(v.len());
    let cw = c.min(w.len());
    let a = v[..cv].iter().chain(&w[cw..]).cloned().collect();
    let b = w[..cw].iter().chain(&v[cv..]).cloned().collect();
    (a, b)
}

/// N-point crossover at the given absolute cut points.
///
/// Segments between consecutive cuts come alternately from each parent,
/// starting with `v` for the first child. Unsorted or duplicate cuts are
/// tolerated.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn n_point_crossover<T: Clone>(v: &[T], w: &[T], cuts: &[usize]) -> (Vec<T>, Vec<T>) {
    assert_eq!(v.len(), w.len(), "parents must have equal length");
    let mut cuts: Vec<usize> = cuts.iter().map(|&c| c.min(v.len())).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut a = v.to_vec();
    let mut b = w.to_vec();
    let mut swapped = false;
    let mut start = 0;
    for end in cuts.into_iter().chain(std::iter::once(v.len())) {
        if swapped {
            a[start..end].clone_from_slice(&w[start..end]);
            b[start..end].clone_from_slice(&v[start..end]);
        }
        swapped = !swapped;
        start = end;
    }
    (a, b)
}

/// Uniform crossover: swaps each position independently with probability `p`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_crossover<T: Clone, R: Rng>(v: &[T], w: &[T], p: f64, rng: &mut R) -> (Vec<T>, Vec<T>) {
    assert_eq!(v.len(), w.len(), "parents must have equal length");
    let mut a = v.to_vec();
    let mut b = w.to_vec();
    for i in 0..a.len() {
        if rng.random_bool(p) {
            std::mem::swap(&mut a[i], &mut b[i]);
        }
    }
    (a, b)
}

/// Uniform crossover among any number of parents.
///
/// At each position, with probability `p`, the genes at that position are
/// shuffled across all parents.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_crossover_many<T: Clone, R: Rng>(parents: &[Vec<T>], p: f64, rng: &mut R) -> Vec<Vec<T>> {
    let mut children = parents.to_vec();
    let Some(len) = parents.first().map(Vec::len) else {
        return children;
    };
    assert!(
        parents.iter().all(|parent| parent.len() == len),
        "parents must have equal length"
    );
    for i in 0..len {
        if rng.random_bool(p) {
            let mut column: Vec<T> = parents.iter().map(|parent| parent[i].clone()).collect();
            shuffle(&mut column, rng);
            for (child, gene) in children.iter_mut().zip(column) {
                child[i] = gene;
            }
        }
    }
    children
}

/// One-point crossover with a uniformly drawn cut in `1..len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnePointCrossover;

impl<T: Clone> Crossover<Vec<T>> for OnePointCrossover {
    fn crossover<R: Rng>(&self, a: &Vec<T>, b: &Vec<T>, rng: &mut R) -> (Vec<T>, Vec<T>) {
        let len = a.len().min(b.len());
        if len < 2 {
            return (a.clone(), b.clone());
        }
        let c = rng.random_range(1..len);
        one_point_crossover(a, b, c)
    }
}

/// N-point crossover with `points` distinct cuts drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NPointCrossover {
    pub points: usize,
}

impl<T: Clone> Crossover<Vec<T>> for NPointCrossover {
    fn crossover<R: Rng>(&self, a: &Vec<T>, b: &Vec<T>, rng: &mut R) -> (Vec<T>, Vec<T>) {
        let len = a.len();
        if len < 2 || self.points == 0 {
            return (a.clone(), b.clone());
        }
        let cuts: Vec<usize> = index::sample(rng, len - 1, self.points.min(len - 1))
            .into_iter()
            .map(|c| c + 1)
            .collect();
        n_point_crossover(a, b, &cuts)
    }
}

/// Uniform crossover; `p = None` uses `1 / len`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformCrossover {
    pub p: Option<f64>,
}

impl<T: Clone> Crossover<Vec<T>> for UniformCrossover {
    fn crossover<R: Rng>(&self, a: &Vec<T>, b: &Vec<T>, rng: &mut R) -> (Vec<T>, Vec<T>) {
        if a.is_empty() {
            return (a.clone(), b.clone());
        }
        let p = self.p.unwrap_or(1.0 / a.len() as f64).clamp(0.0, 1.0);
        uniform_crossover(a, b, p, rng)
    }
}
