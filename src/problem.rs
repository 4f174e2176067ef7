//! The operator contract between the engine and a concrete problem.
//!
//! A problem type implements [`SearchSpace`] to name its candidate
//! representation, then only the capability traits a given procedure needs.
//! Hill climbing needs [`Quality`], [`Termination`] and [`Tweak`]; a genetic
//! algorithm needs [`Quality`], [`Termination`] and [`Generator`] plus
//! crossover and mutation strategies from [`crate::operators`].
//!
//! The engine never inspects a candidate beyond cloning it, and beyond
//! hashing/equality where a tabu list stores whole states.
//!
//! # Implementing
//!
//! ```
//! use metaheur::problem::{Quality, SearchSpace, Termination, Tweak};
//! use rand::Rng;
//!
//! struct Peak;
//!
//! impl SearchSpace for Peak {
//!     type Candidate = i32;
//! }
//!
//! impl Quality for Peak {
//!     fn quality(&self, x: &i32) -> f64 {
//!         -((x - 10) as f64).abs()
//!     }
//! }
//!
//! impl Termination for Peak {
//!     fn is_ideal(&self, x: &i32) -> bool {
//!         *x == 10
//!     }
//! }
//!
//! impl Tweak for Peak {
//!     fn tweak<R: Rng>(&self, x: &i32, rng: &mut R) -> i32 {
//!         if rng.random_bool(0.5) { x + 1 } else { x - 1 }
//!     }
//! }
//! ```

use std::hash::Hash;

use rand::Rng;

use crate::tabu::TabuList;

/// Names the candidate representation of a problem.
pub trait SearchSpace {
    /// One point in the search space. Treated as an opaque value.
    type Candidate: Clone;
}

/// Scalar goodness of a candidate. Higher is better unless an
/// [`Objective::Minimize`] is configured.
///
/// Must be total over every reachable candidate.
pub trait Quality: SearchSpace {
    fn quality(&self, candidate: &Self::Candidate) -> f64;
}

/// Early-termination predicate.
pub trait Termination: SearchSpace {
    /// Returns `true` when `candidate` is good enough to stop the run.
    ///
    /// The default never stops early; the run then ends on its budget.
    fn is_ideal(&self, _candidate: &Self::Candidate) -> bool {
        false
    }
}

/// Produces fresh random candidates.
pub trait Generator: SearchSpace {
    fn random_candidate<R: Rng>(&self, rng: &mut R) -> Self::Candidate;
}

/// Local neighbor generator.
pub trait Tweak: SearchSpace {
    /// Returns a neighbor of `candidate`. Must not modify the input.
    fn tweak<R: Rng>(&self, candidate: &Self::Candidate, rng: &mut R) -> Self::Candidate;
}

/// Neighbor generator that also reports the move it made.
///
/// Used by feature-based tabu search: the tabu list holds move
/// signatures, so a state may be revisited through an untabooed move.
pub trait FeatureTweak: SearchSpace {
    /// Move signature stored in the tabu list.
    type Feature: Clone + Eq + Hash;

    /// Returns a neighbor and the signature of the move that produced it.
    ///
    /// The current tabu list is provided so an implementation may steer
    /// away from tabu moves; the runner enforces tabu status regardless.
    fn tweak_with_feature<R: Rng>(
        &self,
        candidate: &Self::Candidate,
        tabu: &TabuList<Self::Feature>,
        rng: &mut R,
    ) -> (Self::Candidate, Self::Feature);
}

/// Perturbation and home-base selection for iterated local search.
pub trait Perturbation: Quality {
    /// Makes a large jump away from `candidate`.
    fn perturb<R: Rng>(&self, candidate: &Self::Candidate, rng: &mut R) -> Self::Candidate;

    /// Chooses the next home base from the current one and a new local optimum.
    ///
    /// The default keeps `home` unless `candidate` is strictly better.
    fn new_home_base(&self, home: &Self::Candidate, candidate: &Self::Candidate) -> Self::Candidate {
        if self.quality(home) >= self.quality(candidate) {
            home.clone()
        } else {
            candidate.clone()
        }
    }
}

/// Vector arithmetic on candidates.
///
/// Supplied by the caller so that differential evolution, particle swarm
/// and the gradient procedures stay representation-agnostic. For
/// `Vec<f64>` candidates the helpers in [`crate::operators::vector`]
/// implement every method in one line.
pub trait VectorSpace: SearchSpace {
    /// Component-wise `a + b`.
    fn sum(&self, a: &Self::Candidate, b: &Self::Candidate) -> Self::Candidate;

    /// Component-wise `a - b`.
    fn dif(&self, a: &Self::Candidate, b: &Self::Candidate) -> Self::Candidate;

    /// Scalar multiple `k * v`.
    fn mul(&self, k: f64, v: &Self::Candidate) -> Self::Candidate;

    /// Multiplies every component of `v` by its own coefficient drawn
    /// uniformly from `[0, bound]`.
    fn random_scale<R: Rng>(&self, v: &Self::Candidate, bound: f64, rng: &mut R) -> Self::Candidate;

    /// Starting velocity of a swarm particle at `position`. Zero by default.
    fn initial_velocity<R: Rng>(&self, position: &Self::Candidate, _rng: &mut R) -> Self::Candidate {
        self.mul(0.0, position)
    }
}

/// Distance between candidates, used to pick the diverse part of a
/// scatter-search reference set.
pub trait Diversity: SearchSpace {
    fn distance(&self, a: &Self::Candidate, b: &Self::Candidate) -> f64;
}

/// First- and second-order information for gradient procedures.
pub trait Gradient: VectorSpace {
    /// Gradient of the objective at `x`.
    fn gradient(&self, x: &Self::Candidate) -> Self::Candidate;

    /// Magnitude of a gradient vector.
    fn norm(&self, g: &Self::Candidate) -> f64;

    /// The Newton direction `H(x)^-1 * g`.
    ///
    /// Defaults to `g` (plain gradient step) for problems without a Hessian.
    fn newton_step(&self, _x: &Self::Candidate, g: &Self::Candidate) -> Self::Candidate {
        g.clone()
    }
}

/// Direction of improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Higher quality is better (hill climbing, ascent).
    #[default]
    Maximize,
    /// Lower quality is better (hill falling, descent).
    Minimize,
}

impl Objective {
    /// Returns `true` when `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Objective::Maximize => a > b,
            Objective::Minimize => a < b,
        }
    }

    /// The worst possible quality under this objective.
    pub fn worst(self) -> f64 {
        match self {
            Objective::Maximize => f64::NEG_INFINITY,
            Objective::Minimize => f64::INFINITY,
        }
    }
}
