//! SA execution loop.

use rand::Rng;

use super::config::{Reheating, SaConfig};
use crate::error::{check_quality, SearchError};
use crate::population::Incumbent;
use crate::problem::{Objective, Quality, Termination, Tweak};
use crate::random::{rng_from, DEFAULT_SEED};

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<C> {
    /// The best candidate found.
    pub best: C,

    /// Quality of the best candidate.
    pub best_quality: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Whether the run stopped on an ideal candidate.
    pub reached_ideal: bool,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of reheats applied.
    pub reheats: usize,

    /// Best quality after initialization and after each iteration.
    pub history: Vec<f64>,
}

/// Metropolis acceptance for maximization.
///
/// An improving neighbor is always accepted; otherwise it is accepted when a
/// uniform draw in `[0, 1)` is at most `exp((q_neighbor - q_current) / T)`.
pub fn metropolis_accept<R: Rng>(
    current: f64,
    neighbor: f64,
    temperature: f64,
    rng: &mut R,
) -> bool {
    if neighbor > current {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    let probability = ((neighbor - current) / temperature).exp();
    rng.random_range(0.0..1.0) <= probability
}

/// Executes simulated annealing.
pub struct SaRunner;

impl SaRunner {
    /// Runs simulated annealing from `start`.
    ///
    /// Each iteration tweaks the current state once, applies the Metropolis
    /// rule, then either reheats or cools. The run ends on an ideal best
    /// candidate, an exhausted budget, or a temperature at or below
    /// `min_temperature`.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaheur::problem::{Quality, SearchSpace, Termination, Tweak};
    /// use metaheur::sa::{SaConfig, SaRunner};
    /// use rand::Rng;
    ///
    /// struct Parabola;
    /// impl SearchSpace for Parabola { type Candidate = f64; }
    /// impl Quality for Parabola {
    ///     fn quality(&self, x: &f64) -> f64 { -(x - 3.0) * (x - 3.0) }
    /// }
    /// impl Termination for Parabola {}
    /// impl Tweak for Parabola {
    ///     fn tweak<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
    ///         x + rng.random_range(-0.5..0.5)
    ///     }
    /// }
    ///
    /// let config = SaConfig::default().with_initial_temperature(10.0).with_seed(42);
    /// let result = SaRunner::run(&Parabola, -20.0, &config).unwrap();
    /// assert!((result.best - 3.0).abs() < 0.1);
    /// ```
    pub fn run<P>(
        problem: &P,
        start: P::Candidate,
        config: &SaConfig,
    ) -> Result<SaResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Tweak,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);

        let mut current_q = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start.clone(), current_q, Objective::Maximize);
        let mut current = start;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut cooling_step = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut reheats = 0usize;
        let mut since_improvement = 0usize;

        log::debug!(
            "simulated annealing: budget={} T0={} cooling={:?} reheating={:?}",
            config.max_iterations,
            config.initial_temperature,
            config.cooling,
            config.reheating
        );

        while !reached_ideal
            && iterations < config.max_iterations
            && temperature > config.min_temperature
        {
            iterations += 1;

            let neighbor = problem.tweak(&current, &mut rng);
            let neighbor_q = problem.quality(&neighbor);
            if neighbor_q > current_q {
                improving_moves += 1;
            }
            if metropolis_accept(current_q, neighbor_q, temperature, &mut rng) {
                accepted_moves += 1;
                current = neighbor;
                current_q = neighbor_q;
                let before = best.quality();
                reached_ideal = best.offer_checked(problem, &current, current_q);
                if best.quality() != before {
                    since_improvement = 0;
                } else {
                    since_improvement += 1;
                }
            } else {
                since_improvement += 1;
            }
            best.record();

            if let Some(Reheating::Custom(rule)) = config.reheating {
                let next = rule(config.initial_temperature, temperature);
                if next > temperature {
                    log::debug!("reheat at iteration {iterations}: {temperature} -> {next}");
                    reheats += 1;
                }
                temperature = next;
                continue;
            }

            let reheat = match config.reheating {
                Some(Reheating::Periodic { period }) if iterations % period == 0 => {
                    Some(config.initial_temperature)
                }
                Some(Reheating::Stagnation { patience, fraction }) if since_improvement >= patience => {
                    since_improvement = 0;
                    Some(temperature.max(fraction * config.initial_temperature))
                }
                _ => None,
            };
            match reheat {
                Some(t) => {
                    log::debug!("reheat at iteration {iterations}: {temperature} -> {t}");
                    temperature = t;
                    cooling_step = 0;
                    reheats += 1;
                }
                None => {
                    temperature = config.cooling.cool(temperature, cooling_step, config);
                    cooling_step += 1;
                }
            }
        }

        log::debug!(
            "simulated annealing finished: iterations={iterations} best={} T={temperature} accepted={accepted_moves}",
            best.quality()
        );

        let result = best.into_result(iterations, reached_ideal);
        Ok(SaResult {
            best: result.best,
            best_quality: result.best_quality,
            iterations,
            reached_ideal,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            reheats,
            history: result.history,
        })
    }
}
