//! Populations, scored candidates and the running incumbent.
//!
//! - [`Scored`]: a candidate paired with its fitness
//! - [`Population`]: copy-on-write collection used by variants that replace
//!   members of a live population (steady-state GA, scatter search)
//! - [`Incumbent`]: the best candidate seen so far, updated monotonically
//! - [`assess_fitness`] / [`rank`]: evaluation and deterministic ranking

use std::sync::Arc;

use crate::problem::{Objective, Quality, Termination};
use crate::result::SearchResult;

/// A candidate together with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<C> {
    pub candidate: C,
    pub fitness: f64,
}

impl<C> Scored<C> {
    pub fn new(candidate: C, fitness: f64) -> Self {
        Self { candidate, fitness }
    }
}

/// Evaluates every member of `population`.
///
/// Output order matches input order. With the `parallel` feature enabled
/// and `parallel == true`, members are evaluated with rayon; order is
/// still preserved, so downstream ranking is independent of evaluation
/// order.
pub fn assess_fitness<P>(
    problem: &P,
    population: &[P::Candidate],
    parallel: bool,
) -> Vec<Scored<P::Candidate>>
where
    P: Quality + Sync,
    P::Candidate: Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return population
                .par_iter()
                .map(|c| Scored::new(c.clone(), problem.quality(c)))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population
        .iter()
        .map(|c| Scored::new(c.clone(), problem.quality(c)))
        .collect()
}

/// Sorts best-first (highest fitness first).
///
/// The sort is stable: ties keep their original relative order.
pub fn rank<C>(scored: &mut [Scored<C>]) {
    scored.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Index of the fittest member; the lowest index wins ties.
///
/// Returns `None` for an empty slice.
pub fn fittest<C>(scored: &[Scored<C>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, s) in scored.iter().enumerate() {
        if best.is_none_or(|b| s.fitness > scored[b].fitness) {
            best = Some(i);
        }
    }
    best
}

/// Copy-on-write population handle.
///
/// [`replace`](Population::replace) produces a new handle with members
/// removed and inserted in one step. Existing handles, and any iteration
/// over them, keep observing the old membership and size.
#[derive(Debug, Clone)]
pub struct Population<C> {
    members: Arc<Vec<C>>,
}

impl<C: Clone> Population<C> {
    pub fn new(members: Vec<C>) -> Self {
        Self {
            members: Arc::new(members),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn as_slice(&self) -> &[C] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.members.iter()
    }

    /// Returns a new population without the members at `remove` and with
    /// `insert` appended. Survivors keep their relative order.
    ///
    /// # Panics
    /// Panics if an index in `remove` is out of bounds.
    pub fn replace(&self, remove: &[usize], insert: Vec<C>) -> Population<C> {
        let mut indices = remove.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let mut next = Arc::clone(&self.members);
        let members = Arc::make_mut(&mut next);
        for i in indices {
            assert!(i < members.len(), "removal index {i} out of bounds");
            members.remove(i);
        }
        members.extend(insert);
        Population { members: next }
    }

    /// Unwraps the members, cloning only if another handle is still alive.
    pub fn into_vec(self) -> Vec<C> {
        Arc::try_unwrap(self.members).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// The best candidate observed so far in a run.
///
/// Replaced only by a strictly better candidate under its [`Objective`],
/// so ties go to the incumbent and the recorded quality never regresses.
#[derive(Debug, Clone)]
pub struct Incumbent<C> {
    candidate: C,
    quality: f64,
    objective: Objective,
    history: Vec<f64>,
}

impl<C: Clone> Incumbent<C> {
    /// Starts tracking from an initial candidate and records its quality.
    pub fn new(candidate: C, quality: f64, objective: Objective) -> Self {
        Self {
            candidate,
            quality,
            objective,
            history: vec![quality],
        }
    }

    pub fn candidate(&self) -> &C {
        &self.candidate
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Installs `candidate` if it is strictly better. Clones only on success.
    pub fn offer(&mut self, candidate: &C, quality: f64) -> bool {
        if self.objective.is_better(quality, self.quality) {
            log::trace!("incumbent improved: {} -> {}", self.quality, quality);
            self.candidate = candidate.clone();
            self.quality = quality;
            true
        } else {
            false
        }
    }

    /// Offers `candidate` and reports whether it is an ideal state, whether
    /// or not it improved on the incumbent.
    ///
    /// An ideal candidate that only ties the incumbent still replaces it, so
    /// a run that stops on an ideal state at the best quality reports that
    /// state.
    pub fn offer_checked<P>(&mut self, problem: &P, candidate: &C, quality: f64) -> bool
    where
        P: Termination<Candidate = C>,
    {
        if self.offer(candidate, quality) {
            return problem.is_ideal(candidate);
        }
        if !problem.is_ideal(candidate) {
            return false;
        }
        if quality == self.quality {
            log::trace!("ideal candidate ties the incumbent at {quality}");
            self.candidate = candidate.clone();
        }
        true
    }

    /// Offers every member of a scored slice.
    pub fn offer_all(&mut self, scored: &[Scored<C>]) -> bool {
        let mut improved = false;
        for s in scored {
            improved |= self.offer(&s.candidate, s.fitness);
        }
        improved
    }

    /// Appends the current best quality to the history.
    pub fn record(&mut self) {
        self.history.push(self.quality);
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn into_result(self, iterations: usize, reached_ideal: bool) -> SearchResult<C> {
        SearchResult {
            best: self.candidate,
            best_quality: self.quality,
            iterations,
            reached_ideal,
            history: self.history,
        }
    }
}
