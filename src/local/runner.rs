//! Hill climbing, steepest ascent/descent and random search.
//!
//! Every procedure starts from a caller-supplied state, spends one budget
//! unit per iteration, and stops early once the tracked state is ideal.

use rand::distr::Distribution;
use rand::Rng;

use super::config::LocalConfig;
use crate::error::{check_quality, SearchError};
use crate::population::Incumbent;
use crate::problem::{Generator, Objective, Quality, Termination, Tweak};
use crate::random::{rng_from, DEFAULT_SEED};
use crate::result::SearchResult;

/// Best of `n` neighbors of `state` under `objective`; the earliest wins ties.
pub(crate) fn steepest_neighbor<P, R>(
    problem: &P,
    state: &P::Candidate,
    n: usize,
    objective: Objective,
    rng: &mut R,
) -> (P::Candidate, f64)
where
    P: Quality + Tweak,
    R: Rng,
{
    let mut best = problem.tweak(state, rng);
    let mut best_q = problem.quality(&best);
    for _ in 1..n {
        let w = problem.tweak(state, rng);
        let q = problem.quality(&w);
        if objective.is_better(q, best_q) {
            best = w;
            best_q = q;
        }
    }
    (best, best_q)
}

/// Local search runner.
pub struct LocalRunner;

impl LocalRunner {
    /// Hill climbing: accept a single neighbor only if it is strictly better.
    ///
    /// The current state is never worse than any state visited, so the
    /// returned best is the final state.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaheur::local::{LocalConfig, LocalRunner};
    /// use metaheur::problem::{Quality, SearchSpace, Termination, Tweak};
    /// use rand::Rng;
    ///
    /// struct Peak;
    /// impl SearchSpace for Peak { type Candidate = i32; }
    /// impl Quality for Peak {
    ///     fn quality(&self, x: &i32) -> f64 { *x as f64 }
    /// }
    /// impl Termination for Peak {
    ///     fn is_ideal(&self, x: &i32) -> bool { *x == 10 }
    /// }
    /// impl Tweak for Peak {
    ///     fn tweak<R: Rng>(&self, x: &i32, rng: &mut R) -> i32 {
    ///         let step = if rng.random_bool(0.5) { 1 } else { -1 };
    ///         (x + step).clamp(0, 10)
    ///     }
    /// }
    ///
    /// let config = LocalConfig::default().with_max_iterations(500).with_seed(3);
    /// let result = LocalRunner::hill_climbing(&Peak, 0, &config).unwrap();
    /// assert_eq!(result.best, 10);
    /// assert!(result.reached_ideal);
    /// ```
    pub fn hill_climbing<P>(
        problem: &P,
        start: P::Candidate,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak,
    {
        Self::steepest_impl(problem, start, 1, config, "hill climbing")
    }

    /// Steepest ascent (or descent under [`Objective::Minimize`]).
    ///
    /// Samples `config.samples` neighbors per step and moves to the best
    /// one only if it improves on the current state.
    pub fn steepest<P>(
        problem: &P,
        start: P::Candidate,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak,
    {
        Self::steepest_impl(problem, start, config.samples, config, "steepest hill climbing")
    }

    fn steepest_impl<P>(
        problem: &P,
        start: P::Candidate,
        samples: usize,
        config: &LocalConfig,
        name: &str,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut current = Incumbent::new(start, quality, config.objective);

        log::debug!(
            "{name}: budget={} samples={samples} objective={:?}",
            config.max_iterations,
            config.objective
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let (neighbor, q) =
                steepest_neighbor(problem, current.candidate(), samples, config.objective, &mut rng);
            if current.offer_checked(problem, &neighbor, q) {
                reached_ideal = true;
            }
            current.record();
        }

        log::debug!("{name} finished: iterations={iterations} best={}", current.quality());
        Ok(current.into_result(iterations, reached_ideal))
    }

    /// Steepest ascent/descent with replacement.
    ///
    /// Moves to the best sampled neighbor every step, even when it is worse,
    /// and separately tracks the best state ever visited.
    pub fn steepest_with_replacement<P>(
        problem: &P,
        start: P::Candidate,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start.clone(), quality, config.objective);
        let mut current = start;

        log::debug!(
            "steepest hill climbing with replacement: budget={} samples={} objective={:?}",
            config.max_iterations,
            config.samples,
            config.objective
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let (neighbor, q) =
                steepest_neighbor(problem, &current, config.samples, config.objective, &mut rng);
            if best.offer_checked(problem, &neighbor, q) {
                reached_ideal = true;
            }
            current = neighbor;
            best.record();
        }

        log::debug!(
            "steepest hill climbing with replacement finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }

    /// Random search: ignores the neighborhood and draws a fresh candidate
    /// every iteration.
    pub fn random_search<P>(
        problem: &P,
        start: P::Candidate,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Generator,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start, quality, config.objective);

        log::debug!("random search: budget={}", config.max_iterations);

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let candidate = problem.random_candidate(&mut rng);
            let q = problem.quality(&candidate);
            if best.offer_checked(problem, &candidate, q) {
                reached_ideal = true;
            }
            best.record();
        }

        log::debug!(
            "random search finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }

    /// Hill climbing with random restarts.
    ///
    /// Climbs for a number of steps drawn from `restarts`, then jumps to a
    /// fresh random candidate. Every tweak consumes one budget unit; a
    /// climb of length zero still consumes one, so the run always ends.
    pub fn hill_climbing_with_random_restarts<P, D>(
        problem: &P,
        start: P::Candidate,
        restarts: &D,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak + Generator,
        D: Distribution<usize>,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let objective = config.objective;
        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start.clone(), quality, objective);
        let mut current = start;
        let mut current_q = quality;

        log::debug!(
            "hill climbing with random restarts: budget={}",
            config.max_iterations
        );

        let mut iterations = 0;
        let mut climbs = 0usize;
        while !reached_ideal && iterations < config.max_iterations {
            let length = restarts.sample(&mut rng);
            let mut steps = 0;
            while !reached_ideal && steps < length && iterations < config.max_iterations {
                steps += 1;
                iterations += 1;
                let neighbor = problem.tweak(&current, &mut rng);
                let q = problem.quality(&neighbor);
                if objective.is_better(q, current_q) {
                    current = neighbor;
                    current_q = q;
                    if best.offer_checked(problem, &current, current_q) {
                        reached_ideal = true;
                    }
                }
                best.record();
            }
            if steps == 0 {
                iterations += 1;
                best.record();
            }
            if reached_ideal || iterations >= config.max_iterations {
                break;
            }

            climbs += 1;
            current = problem.random_candidate(&mut rng);
            current_q = problem.quality(&current);
            log::debug!("restart {climbs} from quality {current_q}");
            if best.offer_checked(problem, &current, current_q) {
                reached_ideal = true;
            }
        }

        log::debug!(
            "hill climbing with random restarts finished: iterations={iterations} restarts={climbs} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }
}
