//! Selection, variation and vector utilities.
//!
//! Pure functions with no shared state, plus small strategy types that
//! implement the [`Selector`], [`Crossover`] and [`Mutator`] traits so a
//! runner can be parameterized by them.
//!
//! # Submodules
//!
//! - [`selection`]: roulette, stochastic universal sampling, tournaments
//! - [`crossover`]: one-point, n-point, uniform
//! - [`recombination`]: line and intermediate recombination of real vectors
//! - [`mutation`]: bit-flip, bounded uniform and Gaussian convolution
//! - [`vector`]: random vectors and `[f64]` arithmetic
//! - [`pareto`]: dominance, non-dominated fronts, Pareto tournament
//!
//! # References
//!
//! - Luke (2013), *Essentials of Metaheuristics*, 2nd ed., ch. 3-4, 7
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection Algorithm"

pub mod crossover;
pub mod mutation;
pub mod pareto;
pub mod recombination;
pub mod selection;
pub mod vector;

use rand::Rng;

pub use crossover::{NPointCrossover, OnePointCrossover, UniformCrossover};
pub use mutation::{BitFlip, BoundedUniformConvolution, GaussianConvolution};
pub use recombination::{IntermediateRecombination, LineRecombination};
pub use selection::Selection;

/// Chooses parents by fitness.
///
/// Works on a fitness slice (higher is better) and returns indices into it,
/// so the same selector serves any candidate representation.
pub trait Selector {
    /// Selects one index, with replacement across calls.
    ///
    /// # Panics
    /// Implementations may panic if `fitness` is empty.
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize;

    /// Selects `count` indices.
    ///
    /// The default draws independently; strategies with a joint sampling
    /// scheme (stochastic universal sampling) override it.
    fn select_many<R: Rng>(&self, fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        (0..count).map(|_| self.select(fitness, rng)).collect()
    }
}

/// Recombines two parents into two children.
pub trait Crossover<C> {
    fn crossover<R: Rng>(&self, a: &C, b: &C, rng: &mut R) -> (C, C);
}

/// Produces a mutated copy of a candidate.
pub trait Mutator<C> {
    fn mutate<R: Rng>(&self, candidate: &C, rng: &mut R) -> C;
}
