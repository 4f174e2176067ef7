//! Scatter search loop.

use rand::Rng;

use super::config::ScatterConfig;
use crate::error::{check_quality, SearchError};
use crate::local::climb;
use crate::operators::{Crossover, LineRecombination};
use crate::population::{fittest, rank, Incumbent, Population, Scored};
use crate::problem::{Diversity, Generator, Objective, Quality, Termination, Tweak};
use crate::random::rng_from;
use crate::result::SearchResult;

/// Executes scatter search with path relinking.
pub struct ScatterRunner;

impl ScatterRunner {
    /// Runs scatter search.
    ///
    /// `seeds` are kept in the initial population, which is topped up with
    /// random candidates to `config.initial_size`. Every initial candidate
    /// is refined by hill climbing, then the reference set is formed. Each
    /// iteration recombines every distinct pair of reference members,
    /// refines both children and re-forms the reference set from the old
    /// members plus all children.
    pub fn run<P, X>(
        problem: &P,
        seeds: Vec<P::Candidate>,
        crossover: &X,
        config: &ScatterConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Generator + Tweak + Diversity,
        X: Crossover<P::Candidate>,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());

        let missing = config.initial_size.saturating_sub(seeds.len());
        let mut initial = seeds;
        initial.extend((0..missing).map(|_| problem.random_candidate(&mut rng)));

        let mut pool = Vec::with_capacity(initial.len());
        for candidate in initial {
            let quality = check_quality(problem.quality(&candidate))?;
            pool.push(refine(problem, candidate, quality, config, &mut rng));
        }
        let first = fittest(&pool).ok_or(SearchError::EmptyPopulation)?;
        let mut best = Incumbent::new(pool[first].candidate.clone(), pool[first].fitness, Objective::Maximize);
        let mut reached_ideal = problem.is_ideal(best.candidate());
        let mut reference = Population::new(select_reference(problem, pool, config));

        log::debug!(
            "scatter search: reference={} (fitness {}, diversity {}) budget={}",
            reference.len(),
            config.fitness_count,
            config.diversity_count,
            config.max_iterations
        );

        let mut iterations = 0;
        while !reached_ideal && iterations < config.max_iterations {
            iterations += 1;
            let members = reference.as_slice();
            let mut offspring = Vec::new();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let (a, b) = crossover.crossover(&members[i].candidate, &members[j].candidate, &mut rng);
                    for child in [a, b] {
                        let quality = problem.quality(&child);
                        let child = refine(problem, child, quality, config, &mut rng);
                        if best.offer(&child.candidate, child.fitness) {
                            reached_ideal = problem.is_ideal(&child.candidate);
                        }
                        offspring.push(child);
                    }
                }
            }
            let pool = reference.replace(&[], offspring).into_vec();
            reference = Population::new(select_reference(problem, pool, config));
            best.record();
        }

        log::debug!(
            "scatter search finished: iterations={iterations} best={}",
            best.quality()
        );
        Ok(best.into_result(iterations, reached_ideal))
    }

    /// Runs scatter search on real vectors with
    /// [`LineRecombination::default`] as the recombination operator.
    pub fn run_with_line_recombination<P>(
        problem: &P,
        seeds: Vec<Vec<f64>>,
        config: &ScatterConfig,
    ) -> Result<SearchResult<Vec<f64>>, SearchError>
    where
        P: Quality + Termination + Generator + Tweak + Diversity<Candidate = Vec<f64>>,
    {
        Self::run(problem, seeds, &LineRecombination::default(), config)
    }
}

/// Hill-climbs `candidate` for `config.refinement_steps` tweaks.
fn refine<P, R>(
    problem: &P,
    candidate: P::Candidate,
    quality: f64,
    config: &ScatterConfig,
    rng: &mut R,
) -> Scored<P::Candidate>
where
    P: Quality + Termination + Tweak,
    R: Rng,
{
    let climb = climb(
        problem,
        candidate,
        quality,
        config.refinement_steps,
        Objective::Maximize,
        rng,
    );
    Scored::new(climb.state, climb.quality)
}

/// Forms the reference set from `pool`.
///
/// The fitness cut takes the `fitness_count` fittest members, skipping
/// exact duplicates (distance zero) of members already chosen. The
/// diversity cut then repeatedly adds the remaining member whose minimum
/// distance to the chosen ones is largest, until the set holds
/// `fitness_count + diversity_count` members or the pool is exhausted.
/// Ties go to the earlier member in ranked order.
fn select_reference<P: Diversity>(
    problem: &P,
    mut pool: Vec<Scored<P::Candidate>>,
    config: &ScatterConfig,
) -> Vec<Scored<P::Candidate>> {
    rank(&mut pool);
    let mut chosen: Vec<Scored<P::Candidate>> = Vec::with_capacity(config.reference_size());
    let mut rest = Vec::new();
    for s in pool {
        let distinct = chosen
            .iter()
            .all(|c| problem.distance(&c.candidate, &s.candidate) > 0.0);
        if chosen.len() < config.fitness_count && distinct {
            chosen.push(s);
        } else {
            rest.push(s);
        }
    }

    while chosen.len() < config.reference_size() && !rest.is_empty() {
        let mut farthest = 0;
        let mut farthest_distance = f64::NEG_INFINITY;
        for (i, s) in rest.iter().enumerate() {
            let d = chosen
                .iter()
                .map(|c| problem.distance(&c.candidate, &s.candidate))
                .fold(f64::INFINITY, f64::min);
            if d > farthest_distance {
                farthest = i;
                farthest_distance = d;
            }
        }
        chosen.push(rest.remove(farthest));
    }
    chosen
}
