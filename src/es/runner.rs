//! Evolution strategy loop.

use rand::Rng;

use super::config::{EsConfig, EsStrategy};
use crate::error::{check_quality, SearchError};
use crate::operators::Mutator;
use crate::population::{assess_fitness, fittest, rank, Incumbent, Scored};
use crate::problem::{Generator, Objective, Quality, Termination};
use crate::random::rng_from;
use crate::result::SearchResult;

/// Executes (mu, lambda) and (mu + lambda) evolution strategies.
pub struct EsRunner;

impl EsRunner {
    /// Runs the evolution strategy from a random population of
    /// [`EsConfig::population_size`] candidates.
    ///
    /// Every generation consumes one budget unit.
    pub fn run<P, M>(
        problem: &P,
        mutator: &M,
        config: &EsConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Generator + Sync,
        P::Candidate: Send + Sync,
        M: Mutator<P::Candidate>,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        let initial: Vec<P::Candidate> = (0..config.population_size())
            .map(|_| problem.random_candidate(&mut rng))
            .collect();
        evolve(problem, initial, mutator, config, &mut rng)
    }

    /// Runs the evolution strategy from a caller-supplied population.
    ///
    /// `initial` must hold at least [`EsConfig::population_size`]
    /// candidates; the first generation keeps only the `mu` fittest of
    /// them, so a larger population is allowed.
    pub fn run_from<P, M>(
        problem: &P,
        initial: Vec<P::Candidate>,
        mutator: &M,
        config: &EsConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Sync,
        P::Candidate: Send + Sync,
        M: Mutator<P::Candidate>,
    {
        config.validate()?;
        if initial.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }
        if initial.len() < config.population_size() {
            return Err(SearchError::PopulationTooSmall {
                required: config.population_size(),
                actual: initial.len(),
            });
        }
        let mut rng = rng_from(config.seed, || rand::random());
        evolve(problem, initial, mutator, config, &mut rng)
    }
}

fn evolve<P, M, R>(
    problem: &P,
    initial: Vec<P::Candidate>,
    mutator: &M,
    config: &EsConfig,
    rng: &mut R,
) -> Result<SearchResult<P::Candidate>, SearchError>
where
    P: Quality + Termination + Sync,
    P::Candidate: Send + Sync,
    M: Mutator<P::Candidate>,
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
        "evolution strategy: {:?} mu={} lambda={} population={} budget={}",
        config.strategy,
        config.mu,
        config.lambda,
        initial.len(),
        config.max_iterations
    );

    let mut iterations = 0;
    while !reached_ideal && iterations < config.max_iterations {
        iterations += 1;
        scored = next_generation(problem, scored, mutator, config, rng);
        if best.offer_all(&scored) {
            reached_ideal = problem.is_ideal(best.candidate());
        }
        best.record();
    }

    log::debug!(
        "evolution strategy finished: iterations={iterations} best={}",
        best.quality()
    );
    Ok(best.into_result(iterations, reached_ideal))
}

/// Truncates to the `mu` fittest and breeds `lambda / mu` mutants from each.
///
/// Surviving parents keep their fitness under [`EsStrategy::Plus`]; only
/// children are evaluated.
fn next_generation<P, M, R>(
    problem: &P,
    mut scored: Vec<Scored<P::Candidate>>,
    mutator: &M,
    config: &EsConfig,
    rng: &mut R,
) -> Vec<Scored<P::Candidate>>
where
    P: Quality + Sync,
    P::Candidate: Send + Sync,
    M: Mutator<P::Candidate>,
    R: Rng,
{
    rank(&mut scored);
    scored.truncate(config.mu);

    let per_parent = config.lambda / config.mu;
    let children: Vec<P::Candidate> = scored
        .iter()
        .flat_map(|parent| std::iter::repeat_n(&parent.candidate, per_parent))
        .map(|c| mutator.mutate(c, rng))
        .collect();
    let children = assess_fitness(problem, &children, config.parallel);

    match config.strategy {
        EsStrategy::Comma => children,
        EsStrategy::Plus => {
            scored.extend(children);
            scored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::vector::random_vector;
    use crate::operators::GaussianConvolution;
    use crate::problem::SearchSpace;
    use crate::random::create_rng;

    // ---- maximize -sum(x_i^2) on [-5, 5]^dim ----

    struct Sphere {
        dim: usize,
    }

    impl SearchSpace for Sphere {
        type Candidate = Vec<f64>;
    }

    impl Quality for Sphere {
        fn quality(&self, x: &Vec<f64>) -> f64 {
            -x.iter().map(|v| v * v).sum::<f64>()
        }
    }

    impl Termination for Sphere {}

    impl Generator for Sphere {
        fn random_candidate<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
            random_vector(&vec![-5.0; self.dim], &vec![5.0; self.dim], rng)
        }
    }

    fn gaussian() -> GaussianConvolution {
        GaussianConvolution {
            p: 1.0,
            sigma: 0.1,
            min: -5.0,
            max: 5.0,
        }
    }

    #[test]
    fn test_comma_sphere() {
        let config = EsConfig::default()
            .with_max_iterations(300)
            .with_parallel(false)
            .with_seed(42);
        let result = EsRunner::run(&Sphere { dim: 3 }, &gaussian(), &config).unwrap();
        assert!(result.best_quality > -0.1, "best {}", result.best_quality);
        assert_eq!(result.iterations, 300);
        assert_eq!(result.history.len(), 301);
    }

    #[test]
    fn test_plus_sphere() {
        let config = EsConfig::default()
            .with_strategy(EsStrategy::Plus)
            .with_max_iterations(300)
            .with_parallel(false)
            .with_seed(42);
        let result = EsRunner::run(&Sphere { dim: 3 }, &gaussian(), &config).unwrap();
        assert!(result.best_quality > -0.1, "best {}", result.best_quality);
        for w in result.history.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_population_size_invariant() {
        let problem = Sphere { dim: 2 };
        let mut rng = create_rng(8);
        for strategy in [EsStrategy::Comma, EsStrategy::Plus] {
            let config = EsConfig::default()
                .with_mu(3)
                .with_lambda(12)
                .with_strategy(strategy)
                .with_parallel(false);
            let initial: Vec<Vec<f64>> = (0..config.population_size())
                .map(|_| problem.random_candidate(&mut rng))
                .collect();
            let mut scored = assess_fitness(&problem, &initial, false);
            for _ in 0..5 {
                scored = next_generation(&problem, scored, &gaussian(), &config, &mut rng);
                assert_eq!(scored.len(), config.population_size());
            }
        }
    }

    #[test]
    fn test_plus_keeps_parents() {
        let problem = Sphere { dim: 1 };
        let config = EsConfig::default()
            .with_mu(2)
            .with_lambda(4)
            .with_strategy(EsStrategy::Plus)
            .with_parallel(false);
        let initial = vec![vec![3.0], vec![0.5], vec![-4.0], vec![1.0], vec![2.0], vec![-2.5]];
        let scored = assess_fitness(&problem, &initial, false);
        let mut rng = create_rng(1);
        let next = next_generation(&problem, scored, &gaussian(), &config, &mut rng);
        assert_eq!(next[0].candidate, vec![0.5]);
        assert_eq!(next[1].candidate, vec![1.0]);
        assert_eq!(next.len(), 6);
    }

    #[test]
    fn test_run_from_supplied_population() {
        let problem = Sphere { dim: 2 };
        let config = EsConfig::default()
            .with_max_iterations(10)
            .with_parallel(false)
            .with_seed(3);
        // larger than mu + lambda is fine; the origin is already optimal
        let mut initial = vec![vec![4.0, 4.0]; 24];
        initial.push(vec![0.0, 0.0]);
        let result = EsRunner::run_from(&problem, initial, &gaussian(), &config).unwrap();
        assert_eq!(result.best_quality, 0.0);
        assert_eq!(result.history[0], 0.0);
        assert_eq!(result.iterations, 10);
    }

    #[test]
    fn test_run_from_checks_size() {
        let problem = Sphere { dim: 1 };
        let config = EsConfig::default().with_strategy(EsStrategy::Plus);
        assert_eq!(
            EsRunner::run_from(&problem, Vec::new(), &gaussian(), &config).unwrap_err(),
            SearchError::EmptyPopulation
        );
        assert_eq!(
            EsRunner::run_from(&problem, vec![vec![1.0]; 20], &gaussian(), &config).unwrap_err(),
            SearchError::PopulationTooSmall {
                required: 25,
                actual: 20
            }
        );
    }

    #[test]
    fn test_invalid_lambda() {
        let config = EsConfig::default().with_mu(3).with_lambda(10);
        assert!(EsRunner::run(&Sphere { dim: 1 }, &gaussian(), &config).is_err());
    }
}
