//! Differential evolution loop.

use rand::seq::index;
use rand::Rng;

use super::config::DeConfig;
use crate::error::{check_quality, SearchError};
use crate::operators::Crossover;
use crate::population::{assess_fitness, fittest, Incumbent, Scored};
use crate::problem::{Generator, Objective, Quality, Termination, VectorSpace};
use crate::random::rng_from;
use crate::result::SearchResult;

/// Executes differential evolution.
pub struct DeRunner;

impl DeRunner {
    /// Runs DE from a random population.
    ///
    /// Each generation builds one trial per member `q`: pick three distinct
    /// other members `a, b, c`, form the donor `a + alpha * (b - c)`, and
    /// take the first child of `crossover(donor, q)`. The trial replaces
    /// `q` in its slot when its quality is at least `q`'s.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaheur::de::{DeConfig, DeRunner};
    /// use metaheur::operators::{vector, UniformCrossover};
    /// use metaheur::problem::{Generator, Quality, SearchSpace, Termination, VectorSpace};
    /// use rand::Rng;
    ///
    /// struct Sphere;
    /// impl SearchSpace for Sphere { type Candidate = Vec<f64>; }
    /// impl Quality for Sphere {
    ///     fn quality(&self, x: &Vec<f64>) -> f64 { -x.iter().map(|v| v * v).sum::<f64>() }
    /// }
    /// impl Termination for Sphere {}
    /// impl Generator for Sphere {
    ///     fn random_candidate<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
    ///         vector::random_vector(&[-5.0; 2], &[5.0; 2], rng)
    ///     }
    /// }
    /// impl VectorSpace for Sphere {
    ///     fn sum(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> { vector::add(a, b) }
    ///     fn dif(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> { vector::sub(a, b) }
    ///     fn mul(&self, k: f64, v: &Vec<f64>) -> Vec<f64> { vector::scale(k, v) }
    ///     fn random_scale<R: Rng>(&self, v: &Vec<f64>, bound: f64, rng: &mut R) -> Vec<f64> {
    ///         vector::random_scale(v, bound, rng)
    ///     }
    /// }
    ///
    /// let config = DeConfig::default()
    ///     .with_population_size(20)
    ///     .with_max_iterations(200)
    ///     .with_parallel(false)
    ///     .with_seed(42);
    /// let crossover = UniformCrossover { p: Some(0.5) };
    /// let result = DeRunner::run(&Sphere, &crossover, &config).unwrap();
    /// assert!(result.best_quality > -1e-3);
    /// ```
    pub fn run<P, X>(
        problem: &P,
        crossover: &X,
        config: &DeConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Generator + VectorSpace + Sync,
        P::Candidate: Send + Sync,
        X: Crossover<P::Candidate>,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        let initial: Vec<P::Candidate> = (0..config.population_size)
            .map(|_| problem.random_candidate(&mut rng))
            .collect();
        evolve(problem, initial, crossover, config, &mut rng)
    }

    /// Runs DE from a caller-supplied population.
    ///
    /// The population size is taken from `initial`, which needs at least
    /// four members.
    pub fn run_from<P, X>(
        problem: &P,
        initial: Vec<P::Candidate>,
        crossover: &X,
        config: &DeConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + VectorSpace + Sync,
        P::Candidate: Send + Sync,
        X: Crossover<P::Candidate>,
    {
        if initial.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }
        let config = DeConfig {
            population_size: initial.len(),
            ..config.clone()
        };
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        evolve(problem, initial, crossover, &config, &mut rng)
    }
}

fn evolve<P, X, R>(
    problem: &P,
    initial: Vec<P::Candidate>,
    crossover: &X,
    config: &DeConfig,
    rng: &mut R,
) -> Result<SearchResult<P::Candidate>, SearchError>
where
    P: Quality + Termination + VectorSpace + Sync,
    P::Candidate: Send + Sync,
    X: Crossover<P::Candidate>,
    R: Rng,
{
    let mut scored = assess_fitness(problem, &initial, config.parallel);
    for s in &scored {
        check_quality(s.fitness)?;
    }
    let first = fittest(&scored).ok_or(SearchError::EmptyPopulation)?;
    let mut best = Incumbent::new(
        scored[first].candidate.clone(),
        scored[first].fitness,
        Objective::Maximize,
    );
    let mut reached_ideal = problem.is_ideal(best.candidate());

    log::debug!(
        "differential evolution: population={} alpha={} budget={}",
        config.population_size,
        config.alpha,
        config.max_iterations
    );

    let mut iterations = 0;
    while !reached_ideal && iterations < config.max_iterations {
        iterations += 1;
        let replaced = next_generation(problem, &mut scored, crossover, config, rng);
        log::trace!("generation {iterations}: {replaced} slots improved");
        if best.offer_all(&scored) {
            reached_ideal = problem.is_ideal(best.candidate());
        }
        best.record();
    }

    log::debug!(
        "differential evolution finished: iterations={iterations} best={}",
        best.quality()
    );
    Ok(best.into_result(iterations, reached_ideal))
}

/// Three distinct indices in `0..n`, all different from `exclude`.
fn three_others<R: Rng>(n: usize, exclude: usize, rng: &mut R) -> [usize; 3] {
    let picks = index::sample(rng, n - 1, 3);
    let shift = |j: usize| if j >= exclude { j + 1 } else { j };
    [shift(picks.index(0)), shift(picks.index(1)), shift(picks.index(2))]
}

/// Replaces each slot by its trial when the trial is at least as good.
///
/// Donors are built from the generation as it was on entry. Returns the
/// number of replaced slots.
fn next_generation<P, X, R>(
    problem: &P,
    scored: &mut [Scored<P::Candidate>],
    crossover: &X,
    config: &DeConfig,
    rng: &mut R,
) -> usize
where
    P: Quality + VectorSpace + Sync,
    P::Candidate: Send + Sync,
    X: Crossover<P::Candidate>,
    R: Rng,
{
    let n = scored.len();
    let trials: Vec<P::Candidate> = (0..n)
        .map(|i| {
            let [a, b, c] = three_others(n, i, rng);
            let spread = problem.dif(&scored[b].candidate, &scored[c].candidate);
            let donor = problem.sum(&scored[a].candidate, &problem.mul(config.alpha, &spread));
            crossover.crossover(&donor, &scored[i].candidate, rng).0
        })
        .collect();

    let mut replaced = 0;
    for (slot, trial) in scored.iter_mut().zip(assess_fitness(problem, &trials, config.parallel)) {
        if trial.fitness >= slot.fitness {
            *slot = trial;
            replaced += 1;
        }
    }
    replaced
}
