//! Line and intermediate recombination of real vectors.
//!
//! Each child gene is an affine combination of both parents' genes,
//! `t = a * v + (1 - a) * w` and `s = b * w + (1 - b) * v`, with
//! coefficients drawn from `[-deviation, 1 + deviation]`. A caller-supplied
//! check decides whether a proposed pair `(t, s)` is acceptable (typically
//! a bounds test).
//!
//! The second weight is `1 - a`, not `1 + a`: the weights sum to one, so a
//! child lies on the line through both parents and equals a parent at
//! `a = 0` or `a = 1`. With `1 + a` the child would scale away from both
//! parents whenever `w` is nonzero.
//!
//! # References
//!
//! Mühlenbein & Schlierkamp-Voosen (1993), "Predictive Models for the
//! Breeder Genetic Algorithm"

use rand::Rng;

use super::Crossover;

/// Default deviation check: accepts every pair.
pub fn accept_any(_t: f64, _s: f64) -> bool {
    true
}

/// Deviation check accepting a pair only when both genes lie in `[min, max]`.
pub fn within(min: f64, max: f64) -> impl Fn(f64, f64) -> bool + Copy {
    move |t, s| (min..=max).contains(&t) && (min..=max).contains(&s)
}

fn coefficient<R: Rng>(deviation: f64, rng: &mut R) -> f64 {
    rng.random_range(-deviation..=1.0 + deviation)
}

/// Line recombination: one pair of coefficients for the whole vector.
///
/// Positions where `check` rejects the proposed genes keep the parents'
/// original values.
///
/// # Panics
/// Panics if the parents have different lengths or `deviation` is negative.
pub fn line_recombination<R, F>(
    v: &[f64],
    w: &[f64],
    deviation: f64,
    check: F,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>)
where
    R: Rng,
    F: Fn(f64, f64) -> bool,
{
    assert_eq!(v.len(), w.len(), "parents must have equal length");
    let alpha = coefficient(deviation, rng);
    let beta = coefficient(deviation, rng);

    let mut a = v.to_vec();
    let mut b = w.to_vec();
    for i in 0..v.len() {
        let t = alpha * v[i] + (1.0 - alpha) * w[i];
        let s = beta * w[i] + (1.0 - beta) * v[i];
        if check(t, s) {
            a[i] = t;
            b[i] = s;
        }
    }
    (a, b)
}

/// Intermediate recombination: fresh coefficients for every gene.
///
/// Coefficients are redrawn until `check` accepts the pair, at most
/// `max_attempts` times per gene; a gene that never passes keeps the
/// parents' values.
///
/// # Panics
/// Panics if the parents have different lengths or `deviation` is negative.
pub fn intermediate_recombination<R, F>(
    v: &[f64],
    w: &[f64],
    deviation: f64,
    check: F,
    max_attempts: usize,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>)
where
    R: Rng,
    F: Fn(f64, f64) -> bool,
{
    assert_eq!(v.len(), w.len(), "parents must have equal length");
    let mut a = v.to_vec();
    let mut b = w.to_vec();
    for i in 0..v.len() {
        for _ in 0..max_attempts {
            let alpha = coefficient(deviation, rng);
            let beta = coefficient(deviation, rng);
            let t = alpha * v[i] + (1.0 - alpha) * w[i];
            let s = beta * w[i] + (1.0 - beta) * v[i];
            if check(t, s) {
                a[i] = t;
                b[i] = s;
                break;
            }
        }
    }
    (a, b)
}

/// [`line_recombination`] as a [`Crossover`] strategy.
///
/// ```
/// use metaheur::operators::{Crossover, LineRecombination};
/// use metaheur::operators::recombination::within;
/// use metaheur::random::create_rng;
///
/// let op = LineRecombination::new(0.25).with_check(within(-1.0, 1.0));
/// let (a, _) = op.crossover(&vec![0.0, 1.0], &vec![1.0, -1.0], &mut create_rng(1));
/// assert!(a.iter().all(|x| (-1.0..=1.0).contains(x)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LineRecombination<F = fn(f64, f64) -> bool> {
    pub deviation: f64,
    check: F,
}

impl LineRecombination {
    pub fn new(deviation: f64) -> Self {
        Self {
            deviation: deviation.max(0.0),
            check: accept_any,
        }
    }
}

impl Default for LineRecombination {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl<F> LineRecombination<F> {
    /// Replaces the deviation check.
    pub fn with_check<G: Fn(f64, f64) -> bool>(self, check: G) -> LineRecombination<G> {
        LineRecombination {
            deviation: self.deviation,
            check,
        }
    }
}

impl<F: Fn(f64, f64) -> bool> Crossover<Vec<f64>> for LineRecombination<F> {
    fn crossover<R: Rng>(&self, a: &Vec<f64>, b: &Vec<f64>, rng: &mut R) -> (Vec<f64>, Vec<f64>) {
        line_recombination(a, b, self.deviation, &self.check, rng)
    }
}

/// [`intermediate_recombination`] as a [`Crossover`] strategy.
#[derive(Debug, Clone, Copy)]
pub struct IntermediateRecombination<F = fn(f64, f64) -> bool> {
    pub deviation: f64,
    pub max_attempts: usize,
    check: F,
}

impl IntermediateRecombination {
    pub fn new(deviation: f64) -> Self {
        Self {
            deviation: deviation.max(0.0),
            max_attempts: 100,
            check: accept_any,
        }
    }
}

impl Default for IntermediateRecombination {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl<F> IntermediateRecombination<F> {
    /// Replaces the deviation check.
    pub fn with_check<G: Fn(f64, f64) -> bool>(self, check: G) -> IntermediateRecombination<G> {
        IntermediateRecombination {
            deviation: self.deviation,
            max_attempts: self.max_attempts,
            check,
        }
    }

    /// Sets the per-gene resampling cap.
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }
}

impl<F: Fn(f64, f64) -> bool> Crossover<Vec<f64>> for IntermediateRecombination<F> {
    fn crossover<R: Rng>(&self, a: &Vec<f64>, b: &Vec<f64>, rng: &mut R) -> (Vec<f64>, Vec<f64>) {
        intermediate_recombination(a, b, self.deviation, &self.check, self.max_attempts, rng)
    }
}
