//! Iterated local search (ILS).
//!
//! Alternates a short hill climb with a large perturbation. A home base is
//! kept between rounds; [`Perturbation::new_home_base`] decides whether each
//! new local optimum replaces it, and the next round starts from a
//! perturbed copy of the home base.
//!
//! # References
//!
//! Lourenço, Martin & Stützle (2003), "Iterated Local Search",
//! *Handbook of Metaheuristics*, 320-353.

use rand::distr::Distribution;
use rand::Rng;

use super::config::LocalConfig;
use super::runner::LocalRunner;
use crate::error::{check_quality, SearchError};
use crate::population::Incumbent;
use crate::problem::{Objective, Perturbation, Quality, Termination, Tweak};
use crate::random::{rng_from, DEFAULT_SEED};
use crate::result::SearchResult;

/// Outcome of one hill climb.
pub(crate) struct Climb<C> {
    pub(crate) state: C,
    pub(crate) quality: f64,
    pub(crate) steps: usize,
}

/// Hill-climbs from `state` for at most `steps` tweaks, stopping early on
/// an ideal state.
pub(crate) fn climb<P, R>(
    problem: &P,
    state: P::Candidate,
    quality: f64,
    steps: usize,
    objective: Objective,
    rng: &mut R,
) -> Climb<P::Candidate>
where
    P: Quality + Termination + Tweak,
    R: Rng,
{
    let mut climb = Climb {
        state,
        quality,
        steps: 0,
    };
    while climb.steps < steps && !problem.is_ideal(&climb.state) {
        climb.steps += 1;
        let neighbor = problem.tweak(&climb.state, rng);
        let q = problem.quality(&neighbor);
        if objective.is_better(q, climb.quality) {
            climb.state = neighbor;
            climb.quality = q;
        }
    }
    climb
}

impl LocalRunner {
    /// Iterated local search with a fixed refinement length.
    ///
    /// Each iteration climbs `config.local_steps` tweaks from the current
    /// state, offers the result as the new best, updates the home base and
    /// perturbs it. One iteration consumes one budget unit.
    pub fn iterated_local_search<P>(
        problem: &P,
        start: P::Candidate,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Perturbation + Termination + Tweak,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start.clone(), quality, config.objective);
        let mut home = start.clone();
        let mut current = start;
        let mut current_q = quality;

        log::debug!(
            "iterated local search: budget={} local_steps={}",
            config.max_iterations,
            config.local_steps
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let local = climb(
                problem,
                current,
                current_q,
                config.local_steps,
                config.objective,
                &mut rng,
            );
            if best.offer_checked(problem, &local.state, local.quality) {
                reached_ideal = true;
            }
            home = problem.new_home_base(&home, &local.state);
            current = problem.perturb(&home, &mut rng);
            current_q = problem.quality(&current);
            best.record();
        }

        log::debug!(
            "iterated local search finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }

    /// Iterated local search whose climb lengths are drawn from `restarts`.
    ///
    /// Every tweak consumes one budget unit; a climb of length zero still
    /// consumes one, so the run always ends.
    pub fn iterated_local_search_with_random_restarts<P, D>(
        problem: &P,
        start: P::Candidate,
        restarts: &D,
        config: &LocalConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Perturbation + Termination + Tweak,
        D: Distribution<usize>,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start.clone(), quality, config.objective);
        let mut home = start.clone();
        let mut current = start;
        let mut current_q = quality;

        log::debug!(
            "iterated local search with random restarts: budget={}",
            config.max_iterations
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            let length = restarts
                .sample(&mut rng)
                .min(config.max_iterations - iterations);
            let local = climb(problem, current, current_q, length, config.objective, &mut rng);
            let used = local.steps.max(1);
            iterations += used;
            if best.offer_checked(problem, &local.state, local.quality) {
                reached_ideal = true;
            }
            for _ in 0..used {
                best.record();
            }
            home = problem.new_home_base(&home, &local.state);
            current = problem.perturb(&home, &mut rng);
            current_q = problem.quality(&current);
        }

        log::debug!(
            "iterated local search with random restarts finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }
}
