//! Tabu search execution engine.
//!
//! # Algorithm
//!
//! 1. Push the starting state onto the tabu list
//! 2. At each iteration:
//!    a. Sample `samples` neighbors of the current state
//!    b. Take the best neighbor that is not tabu
//!    c. If every sample is tabu, take the best one only under aspiration
//!       (it must beat the best quality so far); otherwise stay put
//!    d. Move to the chosen neighbor and push it (or its feature) onto the list
//!    e. Update the global best
//! 3. Terminate on an ideal state or after `max_iterations`

use std::hash::Hash;

use super::config::TabuConfig;
use super::memory::TabuList;
use crate::error::{check_quality, SearchError};
use crate::population::Incumbent;
use crate::problem::{FeatureTweak, Objective, Quality, Termination, Tweak};
use crate::random::{rng_from, DEFAULT_SEED};
use crate::result::SearchResult;

/// Best sampled neighbor, split by tabu status.
struct Samples<C> {
    admissible: Option<(C, f64)>,
    tabu: Option<(C, f64)>,
}

impl<C> Samples<C> {
    fn new() -> Self {
        Self {
            admissible: None,
            tabu: None,
        }
    }

    fn offer(&mut self, candidate: C, quality: f64, is_tabu: bool) {
        let slot = if is_tabu {
            &mut self.tabu
        } else {
            &mut self.admissible
        };
        if slot.as_ref().is_none_or(|(_, q)| quality > *q) {
            *slot = Some((candidate, quality));
        }
    }

    /// The move to make this iteration, if any.
    fn choose(self, aspiration: bool, best_quality: f64) -> Option<(C, f64)> {
        match (self.admissible, self.tabu) {
            (Some(chosen), _) => Some(chosen),
            (None, Some((c, q))) if aspiration && q > best_quality => {
                log::trace!("aspiration overrides tabu status at quality {q}");
                Some((c, q))
            }
            _ => None,
        }
    }
}

/// Tabu search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Tabu search over whole states.
    ///
    /// The list holds recently accepted states, so the candidate type must
    /// support hashing and equality.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaheur::problem::{Quality, SearchSpace, Termination, Tweak};
    /// use metaheur::tabu::{TabuConfig, TabuRunner};
    /// use rand::Rng;
    ///
    /// struct Target;
    /// impl SearchSpace for Target { type Candidate = i64; }
    /// impl Quality for Target {
    ///     fn quality(&self, x: &i64) -> f64 { -((x - 5) * (x - 5)) as f64 }
    /// }
    /// impl Termination for Target {
    ///     fn is_ideal(&self, x: &i64) -> bool { *x == 5 }
    /// }
    /// impl Tweak for Target {
    ///     fn tweak<R: Rng>(&self, x: &i64, rng: &mut R) -> i64 {
    ///         if rng.random_bool(0.5) { x + 1 } else { x - 1 }
    ///     }
    /// }
    ///
    /// let config = TabuConfig::default().with_max_iterations(200).with_seed(1);
    /// let result = TabuRunner::run(&Target, -20, &config).unwrap();
    /// assert_eq!(result.best, 5);
    /// ```
    pub fn run<P>(
        problem: &P,
        start: P::Candidate,
        config: &TabuConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak,
        P::Candidate: Eq + Hash,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);

        let mut current = start;
        let quality = check_quality(problem.quality(&current))?;
        let mut best = Incumbent::new(current.clone(), quality, Objective::Maximize);
        let mut tabu = TabuList::new(config.tabu_size);
        tabu.push(current.clone());
        let mut reached_ideal = problem.is_ideal(&current);

        log::debug!(
            "tabu search: budget={} tabu_size={} samples={}",
            config.max_iterations,
            config.tabu_size,
            config.samples
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;

            let mut samples = Samples::new();
            for _ in 0..config.samples {
                let neighbor = problem.tweak(&current, &mut rng);
                let q = problem.quality(&neighbor);
                let is_tabu = tabu.contains(&neighbor);
                samples.offer(neighbor, q, is_tabu);
            }

            if let Some((next, q)) = samples.choose(config.aspiration, best.quality()) {
                tabu.push(next.clone());
                reached_ideal = best.offer_checked(problem, &next, q);
                current = next;
            }
            best.record();
        }

        log::debug!(
            "tabu search finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }

    /// Tabu search over move features.
    ///
    /// The list holds the features of recently accepted moves rather than
    /// states, so a state may be revisited through a move whose feature is
    /// not tabu.
    pub fn run_feature_based<P>(
        problem: &P,
        start: P::Candidate,
        config: &TabuConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + FeatureTweak,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);

        let mut current = start;
        let quality = check_quality(problem.quality(&current))?;
        let mut best = Incumbent::new(current.clone(), quality, Objective::Maximize);
        let mut tabu: TabuList<P::Feature> = TabuList::new(config.tabu_size);
        let mut reached_ideal = problem.is_ideal(&current);

        log::debug!(
            "feature-based tabu search: budget={} tabu_size={} samples={}",
            config.max_iterations,
            config.tabu_size,
            config.samples
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;

            let mut samples = Samples::new();
            for _ in 0..config.samples {
                let (neighbor, feature) = problem.tweak_with_feature(&current, &tabu, &mut rng);
                let q = problem.quality(&neighbor);
                let is_tabu = tabu.contains(&feature);
                samples.offer((neighbor, feature), q, is_tabu);
            }

            if let Some(((next, feature), q)) = samples.choose(config.aspiration, best.quality()) {
                tabu.push(feature);
                reached_ideal = best.offer_checked(problem, &next, q);
                current = next;
            }
            best.record();
        }

        log::debug!(
            "feature-based tabu search finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }
}
