//! GA execution loop.

use rand::Rng;

use super::config::{GaConfig, GaVariant};
use crate::error::{check_quality, SearchError};
use crate::operators::{Crossover, Mutator, Selection, Selector};
use crate::population::{assess_fitness, fittest, Incumbent, Population, Scored};
use crate::problem::{Generator, Objective, Quality, Termination};
use crate::random::{rng_from, shuffle};
use crate::result::SearchResult;

/// Executes the genetic algorithm family.
///
/// The runner is stateless; all state lives inside [`GaRunner::run`].
///
/// # Algorithm
///
/// 1. Initialize a random population and evaluate it
/// 2. Each iteration derives the next population per [`GaVariant`],
///    evaluates it and offers every member to the running best
/// 3. Stop on an ideal best candidate or an exhausted budget
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from a random initial population of
    /// `config.population_size` candidates.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaheur::ga::{GaConfig, GaRunner};
    /// use metaheur::operators::{vector, BitFlip, OnePointCrossover};
    /// use metaheur::problem::{Generator, Quality, SearchSpace, Termination};
    /// use rand::Rng;
    ///
    /// struct OneMax;
    /// impl SearchSpace for OneMax { type Candidate = Vec<bool>; }
    /// impl Quality for OneMax {
    ///     fn quality(&self, x: &Vec<bool>) -> f64 { x.iter().filter(|&&b| b).count() as f64 }
    /// }
    /// impl Termination for OneMax {
    ///     fn is_ideal(&self, x: &Vec<bool>) -> bool { x.iter().all(|&b| b) }
    /// }
    /// impl Generator for OneMax {
    ///     fn random_candidate<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
    ///         vector::random_bit_vector(16, rng)
    ///     }
    /// }
    ///
    /// let config = GaConfig::default()
    ///     .with_population_size(40)
    ///     .with_max_iterations(200)
    ///     .with_parallel(false)
    ///     .with_seed(42);
    /// let result = GaRunner::run(&OneMax, &OnePointCrossover, &BitFlip { p: 1.0 / 16.0 }, &config).unwrap();
    /// assert!(result.best_quality >= 14.0);
    /// ```
    pub fn run<P, X, M>(
        problem: &P,
        crossover: &X,
        mutator: &M,
        config: &GaConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Generator + Sync,
        P::Candidate: Send + Sync,
        X: Crossover<P::Candidate>,
        M: Mutator<P::Candidate>,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        let initial: Vec<P::Candidate> = (0..config.population_size)
            .map(|_| problem.random_candidate(&mut rng))
            .collect();
        evolve(problem, initial, crossover, mutator, config, &mut rng)
    }

    /// Runs the GA from a supplied initial population.
    ///
    /// The population size is taken from `initial`;
    /// `config.population_size` is ignored.
    pub fn run_from<P, X, M>(
        problem: &P,
        initial: Vec<P::Candidate>,
        crossover: &X,
        mutator: &M,
        config: &GaConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Sync,
        P::Candidate: Send + Sync,
        X: Crossover<P::Candidate>,
        M: Mutator<P::Candidate>,
    {
        if initial.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }
        let config = GaConfig {
            population_size: initial.len(),
            ..config.clone()
        };
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        evolve(problem, initial, crossover, mutator, &config, &mut rng)
    }
}

fn evolve<P, X, M, R>(
    problem: &P,
    initial: Vec<P::Candidate>,
    crossover: &X,
    mutator: &M,
    config: &GaConfig,
    rng: &mut R,
) -> Result<SearchResult<P::Candidate>, SearchError>
where
    P: Quality + Termination + Sync,
    P::Candidate: Send + Sync,
    X: Crossover<P::Candidate>,
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
        "genetic algorithm: variant={:?} population={} budget={} selection={:?}",
        config.variant,
        scored.len(),
        config.max_iterations,
        config.selection
    );

    let mut iterations = 0;
    if let GaVariant::SteadyState { death } = config.variant {
        let mut population = Population::new(initial);
        let mut fitness: Vec<f64> = scored.iter().map(|s| s.fitness).collect();
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let parents = config.selection.select_many(&fitness, 2, rng);
            let members = population.as_slice();
            let (a, b) = mate(
                &members[parents[0]],
                &members[parents[1]],
                crossover,
                config.crossover_rate,
                rng,
            );
            let children = vec![mutator.mutate(&a, rng), mutator.mutate(&b, rng)];
            let qualities: Vec<f64> = children.iter().map(|c| problem.quality(c)).collect();
            for (child, &q) in children.iter().zip(&qualities) {
                if best.offer(child, q) {
                    reached_ideal = problem.is_ideal(child);
                }
            }

            let doomed = death_pair(death, &fitness, rng);
            population = population.replace(&doomed, children);
            remove_indices(&mut fitness, &doomed);
            fitness.extend(qualities);
            best.record();
        }
    } else {
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let next = breed(&scored, crossover, mutator, config, rng);
            scored = assess_fitness(problem, &next, config.parallel);
            if best.offer_all(&scored) {
                reached_ideal = problem.is_ideal(best.candidate());
            }
            best.record();
        }
    }

    log::debug!(
        "genetic algorithm finished: iterations={iterations} best={} ideal={reached_ideal}",
        best.quality()
    );
    Ok(best.into_result(iterations, reached_ideal))
}

/// Crosses `a` and `b` with probability `rate`, otherwise copies them.
fn mate<C, X, R>(a: &C, b: &C, crossover: &X, rate: f64, rng: &mut R) -> (C, C)
where
    C: Clone,
    X: Crossover<C>,
    R: Rng,
{
    if rng.random_bool(rate) {
        crossover.crossover(a, b, rng)
    } else {
        (a.clone(), b.clone())
    }
}

/// Builds the next generation for the generational variants.
///
/// The result always has exactly `scored.len()` members.
fn breed<C, X, M, R>(
    scored: &[Scored<C>],
    crossover: &X,
    mutator: &M,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<C>
where
    C: Clone,
    X: Crossover<C>,
    M: Mutator<C>,
    R: Rng,
{
    let n = scored.len();
    let fitness: Vec<f64> = scored.iter().map(|s| s.fitness).collect();
    let mut next = Vec::with_capacity(n);

    if let GaVariant::TreeStyle { copy_probability } = config.variant {
        while next.len() < n {
            if rng.random_bool(copy_probability) {
                let i = config.selection.select(&fitness, rng);
                next.push(scored[i].candidate.clone());
            } else {
                let i = config.selection.select(&fitness, rng);
                let j = config.selection.select(&fitness, rng);
                let (a, b) = crossover.crossover(&scored[i].candidate, &scored[j].candidate, rng);
                next.push(a);
                if next.len() < n {
                    next.push(b);
                }
            }
        }
        return next;
    }

    if let GaVariant::Elitist { elites } = config.variant {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            fitness[b]
                .partial_cmp(&fitness[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        next.extend(order.iter().take(elites).map(|&i| scored[i].candidate.clone()));
    }

    // SUS places its pointers in population order; shuffle so mates differ
    let pairs = (n - next.len()).div_ceil(2);
    let mut parents = config.selection.select_many(&fitness, 2 * pairs, rng);
    shuffle(&mut parents, rng);
    for pair in parents.chunks_exact(2) {
        let (a, b) = mate(
            &scored[pair[0]].candidate,
            &scored[pair[1]].candidate,
            crossover,
            config.crossover_rate,
            rng,
        );
        next.push(mutator.mutate(&a, rng));
        if next.len() < n {
            next.push(mutator.mutate(&b, rng));
        }
    }
    next
}

/// Picks two distinct members to remove, favouring the least fit.
///
/// `death` is applied to `max - fitness`, so the worst member carries the
/// largest weight. Requires at least two members.
fn death_pair<R: Rng>(death: Selection, fitness: &[f64], rng: &mut R) -> [usize; 2] {
    let top = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let inverted: Vec<f64> = fitness.iter().map(|f| top - f).collect();
    let first = death.select(&inverted, rng);

    let rest: Vec<usize> = (0..fitness.len()).filter(|&i| i != first).collect();
    let rest_inverted: Vec<f64> = rest.iter().map(|&i| inverted[i]).collect();
    let second = rest[death.select(&rest_inverted, rng)];
    [first, second]
}

/// Removes `indices` from `values`, keeping survivors in order.
fn remove_indices(values: &mut Vec<f64>, indices: &[usize]) {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    for i in sorted {
        values.remove(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::vector::random_bit_vector;
    use crate::operators::{BitFlip, OnePointCrossover};
    use crate::problem::SearchSpace;
    use crate::random::create_rng;

    // ---- OneMax: maximize the number of true bits ----

    struct OneMax {
        n: usize,
    }

    impl SearchSpace for OneMax {
        type Candidate = Vec<bool>;
    }

    impl Quality for OneMax {
        fn quality(&self, x: &Vec<bool>) -> f64 {
            x.iter().filter(|&&b| b).count() as f64
        }
    }

    impl Termination for OneMax {
        fn is_ideal(&self, x: &Vec<bool>) -> bool {
            x.iter().all(|&b| b)
        }
    }

    impl Generator for OneMax {
        fn random_candidate<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            random_bit_vector(self.n, rng)
        }
    }

    struct Unchanged;

    impl<C: Clone> Mutator<C> for Unchanged {
        fn mutate<R: Rng>(&self, candidate: &C, _rng: &mut R) -> C {
            candidate.clone()
        }
    }

    fn onemax_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(50)
            .with_max_iterations(200)
            .with_parallel(false)
            .with_seed(42)
    }

    fn check_history<C>(result: &SearchResult<C>) {
        assert_eq!(result.history.len(), result.iterations + 1);
        for w in result.history.windows(2) {
            assert!(w[1] >= w[0], "best regressed: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_generational_onemax() {
        let problem = OneMax { n: 20 };
        let result =
            GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.05 }, &onemax_config())
                .unwrap();
        assert!(
            result.best_quality >= 18.0,
            "expected >= 18 true bits, got {}",
            result.best_quality
        );
        check_history(&result);
    }

    #[test]
    fn test_elitist_onemax() {
        let problem = OneMax { n: 20 };
        let config = onemax_config().with_variant(GaVariant::Elitist { elites: 2 });
        let result =
            GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.05 }, &config).unwrap();
        assert!(result.best_quality >= 18.0, "got {}", result.best_quality);
        check_history(&result);
    }

    #[test]
    fn test_steady_state_onemax() {
        let problem = OneMax { n: 20 };
        let config = onemax_config()
            .with_population_size(30)
            .with_max_iterations(3000)
            .with_variant(GaVariant::SteadyState {
                death: Selection::Tournament(2),
            });
        let result =
            GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.05 }, &config).unwrap();
        assert!(result.best_quality >= 18.0, "got {}", result.best_quality);
        check_history(&result);
    }

    #[test]
    fn test_tree_style_keeps_best() {
        let problem = OneMax { n: 20 };
        let config = onemax_config().with_variant(GaVariant::TreeStyle {
            copy_probability: 0.1,
        });
        let result =
            GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.05 }, &config).unwrap();
        assert!(result.best_quality >= result.history[0]);
        check_history(&result);
    }

    #[test]
    fn test_stops_on_ideal() {
        let problem = OneMax { n: 8 };
        let config = onemax_config().with_max_iterations(10_000);
        let result =
            GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.125 }, &config).unwrap();
        assert!(result.reached_ideal);
        assert_eq!(result.best_quality, 8.0);
        assert!(result.iterations < 10_000);
    }

    #[test]
    fn test_population_size_invariant() {
        let mut rng = create_rng(3);
        for n in [2usize, 5, 7, 10] {
            let scored: Vec<Scored<Vec<bool>>> = (0..n)
                .map(|i| Scored::new(random_bit_vector(6, &mut rng), i as f64))
                .collect();
            for variant in [
                GaVariant::Generational,
                GaVariant::Elitist { elites: 1 },
                GaVariant::TreeStyle {
                    copy_probability: 0.5,
                },
            ] {
                let config = GaConfig::default().with_variant(variant);
                for _ in 0..10 {
                    let next = breed(&scored, &OnePointCrossover, &BitFlip { p: 0.1 }, &config, &mut rng);
                    assert_eq!(next.len(), n, "{variant:?} changed the population size");
                }
            }
        }
    }

    #[test]
    fn test_elites_copied_unchanged() {
        let scored: Vec<Scored<i32>> = [3, 9, 1, 7, 5]
            .iter()
            .map(|&v| Scored::new(v, v as f64))
            .collect();
        struct Negate;
        impl Mutator<i32> for Negate {
            fn mutate<R: Rng>(&self, c: &i32, _rng: &mut R) -> i32 {
                -c
            }
        }
        struct Swap;
        impl Crossover<i32> for Swap {
            fn crossover<R: Rng>(&self, a: &i32, b: &i32, _rng: &mut R) -> (i32, i32) {
                (*b, *a)
            }
        }
        let config = GaConfig::default().with_variant(GaVariant::Elitist { elites: 2 });
        let mut rng = create_rng(1);
        let next = breed(&scored, &Swap, &Negate, &config, &mut rng);
        assert_eq!(&next[..2], &[9, 7]);
        // every bred slot went through mutation
        assert!(next[2..].iter().all(|&v| v < 0));
    }

    #[test]
    fn test_tree_style_copies_without_mutation() {
        let scored: Vec<Scored<i32>> = (1..=6).map(|v| Scored::new(v, v as f64)).collect();
        struct Panics;
        impl Mutator<i32> for Panics {
            fn mutate<R: Rng>(&self, _c: &i32, _rng: &mut R) -> i32 {
                panic!("tree-style GA must not mutate")
            }
        }
        struct Sum;
        impl Crossover<i32> for Sum {
            fn crossover<R: Rng>(&self, a: &i32, b: &i32, _rng: &mut R) -> (i32, i32) {
                (a + b, a + b)
            }
        }
        let mut rng = create_rng(2);
        let config = GaConfig::default().with_variant(GaVariant::TreeStyle {
            copy_probability: 1.0,
        });
        let next = breed(&scored, &Sum, &Panics, &config, &mut rng);
        assert!(next.iter().all(|v| (1..=6).contains(v)));

        let config = GaConfig::default().with_variant(GaVariant::TreeStyle {
            copy_probability: 0.0,
        });
        let next = breed(&scored, &Sum, &Panics, &config, &mut rng);
        assert!(next.iter().all(|v| (2..=12).contains(v)));
    }

    #[test]
    fn test_zero_crossover_rate_copies_parents() {
        let scored: Vec<Scored<i32>> = (1..=5).map(|v| Scored::new(v, v as f64)).collect();
        struct Never;
        impl Crossover<i32> for Never {
            fn crossover<R: Rng>(&self, _a: &i32, _b: &i32, _rng: &mut R) -> (i32, i32) {
                panic!("crossover applied at rate 0")
            }
        }
        let config = GaConfig::default().with_crossover_rate(0.0);
        let mut rng = create_rng(5);
        let next = breed(&scored, &Never, &Unchanged, &config, &mut rng);
        assert_eq!(next.len(), 5);
        assert!(next.iter().all(|v| (1..=5).contains(v)));
    }

    #[test]
    fn test_death_pair_distinct() {
        let mut rng = create_rng(9);
        let fitness = [4.0, 1.0, 3.0, 2.0];
        for _ in 0..200 {
            let [a, b] = death_pair(Selection::Tournament(2), &fitness, &mut rng);
            assert_ne!(a, b);
            assert!(a < 4 && b < 4);
        }
        // a full tournament without replacement always finds the two worst
        let [a, b] = death_pair(Selection::TournamentWithExtraction(4), &fitness, &mut rng);
        assert_eq!(a, 1);
        assert_eq!(b, 3);
    }

    #[test]
    fn test_remove_indices() {
        let mut v = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        remove_indices(&mut v, &[3, 0]);
        assert_eq!(v, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_run_from_errors() {
        let problem = OneMax { n: 4 };
        let config = onemax_config();
        let err = GaRunner::run_from(&problem, vec![], &OnePointCrossover, &Unchanged, &config);
        assert_eq!(err.unwrap_err(), SearchError::EmptyPopulation);
        let err = GaRunner::run_from(
            &problem,
            vec![vec![true; 4]],
            &OnePointCrossover,
            &Unchanged,
            &config,
        );
        assert!(matches!(
            err,
            Err(SearchError::PopulationTooSmall { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_run_from_ideal_start() {
        let problem = OneMax { n: 4 };
        let initial = vec![vec![false; 4], vec![true; 4], vec![false; 4]];
        let result =
            GaRunner::run_from(&problem, initial, &OnePointCrossover, &Unchanged, &onemax_config())
                .unwrap();
        assert!(result.reached_ideal);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.history, vec![4.0]);
    }

    #[test]
    fn test_seed_reproducible() {
        let problem = OneMax { n: 12 };
        let config = onemax_config().with_max_iterations(20);
        let a = GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.1 }, &config).unwrap();
        let b = GaRunner::run(&problem, &OnePointCrossover, &BitFlip { p: 0.1 }, &config).unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }
}
