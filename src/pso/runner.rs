//! Particle swarm loop.

use rand::seq::index;
use rand::Rng;

use super::config::PsoConfig;
use crate::error::{check_quality, SearchError};
use crate::population::{assess_fitness, Incumbent};
use crate::problem::{Generator, Objective, Quality, Termination, VectorSpace};
use crate::random::rng_from;

/// One member of the swarm.
#[derive(Debug, Clone)]
pub struct Particle<C> {
    /// Current position.
    pub position: C,

    /// Current velocity, persisted between iterations.
    pub velocity: C,

    /// Quality of the current position.
    pub quality: f64,

    /// Positions held before each move, oldest first.
    pub history: Vec<C>,

    /// Best position this particle has visited.
    pub best: C,

    /// Quality of `best`.
    pub best_quality: f64,
}

/// Result of a particle swarm run.
#[derive(Debug, Clone)]
pub struct PsoResult<C> {
    /// The best position found by any particle.
    pub best: C,

    /// Quality of the best position.
    pub best_quality: f64,

    /// Number of swarm updates performed.
    pub iterations: usize,

    /// Whether the run stopped on an ideal position.
    pub reached_ideal: bool,

    /// Best quality after initialization and after each iteration.
    pub history: Vec<f64>,

    /// The swarm as it stood when the run ended.
    pub swarm: Vec<Particle<C>>,
}

/// Executes particle swarm optimization.
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO from random positions with velocities from
    /// [`VectorSpace::initial_velocity`].
    ///
    /// Every iteration first computes all new velocities from the same
    /// snapshot of the swarm, then moves every particle, then evaluates the
    /// new positions.
    pub fn run<P>(problem: &P, config: &PsoConfig) -> Result<PsoResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + Generator + VectorSpace + Sync,
        P::Candidate: Send + Sync,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        let positions: Vec<P::Candidate> = (0..config.swarm_size)
            .map(|_| problem.random_candidate(&mut rng))
            .collect();
        fly(problem, positions, config, &mut rng)
    }

    /// Runs PSO from caller-supplied starting positions.
    ///
    /// The swarm size is taken from `initial`; velocities still come from
    /// [`VectorSpace::initial_velocity`].
    pub fn run_from<P>(
        problem: &P,
        initial: Vec<P::Candidate>,
        config: &PsoConfig,
    ) -> Result<PsoResult<P::Candidate>, SearchError>
    where
        P: Quality + Termination + VectorSpace + Sync,
        P::Candidate: Send + Sync,
    {
        if initial.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }
        let config = PsoConfig {
            swarm_size: initial.len(),
            ..config.clone()
        };
        config.validate()?;
        let mut rng = rng_from(config.seed, || rand::random());
        fly(problem, initial, &config, &mut rng)
    }
}

fn fly<P, R>(
    problem: &P,
    positions: Vec<P::Candidate>,
    config: &PsoConfig,
    rng: &mut R,
) -> Result<PsoResult<P::Candidate>, SearchError>
where
    P: Quality + Termination + VectorSpace + Sync,
    P::Candidate: Send + Sync,
    R: Rng,
{
    let mut swarm = Vec::with_capacity(positions.len());
    for s in assess_fitness(problem, &positions, config.parallel) {
        let quality = check_quality(s.fitness)?;
        swarm.push(Particle {
            velocity: problem.initial_velocity(&s.candidate, rng),
            best: s.candidate.clone(),
            position: s.candidate,
            quality,
            history: Vec::new(),
            best_quality: quality,
        });
    }

    let mut best = Incumbent::new(swarm[0].position.clone(), swarm[0].quality, Objective::Maximize);
    for p in &swarm[1..] {
        best.offer(&p.position, p.quality);
    }
    let mut reached_ideal = problem.is_ideal(best.candidate());

    log::debug!(
        "particle swarm: swarm={} informants={} budget={}",
        swarm.len(),
        config.informants,
        config.max_iterations
    );

    let mut iterations = 0;
    while !reached_ideal && iterations < config.max_iterations {
        iterations += 1;

        let velocities: Vec<P::Candidate> = (0..swarm.len())
            .map(|i| {
                let informant = best_informant(&swarm, i, config.informants, rng);
                velocity(problem, &swarm[i], &swarm[informant].best, best.candidate(), config, rng)
            })
            .collect();

        for (p, v) in swarm.iter_mut().zip(velocities) {
            let next = problem.sum(&p.position, &problem.mul(config.epsilon, &v));
            p.history.push(std::mem::replace(&mut p.position, next));
            p.velocity = v;
        }

        let positions: Vec<P::Candidate> = swarm.iter().map(|p| p.position.clone()).collect();
        let scored = assess_fitness(problem, &positions, config.parallel);
        for (p, s) in swarm.iter_mut().zip(scored) {
            p.quality = s.fitness;
            if s.fitness > p.best_quality {
                p.best = s.candidate;
                p.best_quality = s.fitness;
            }
            if best.offer(&p.position, p.quality) {
                reached_ideal = problem.is_ideal(&p.position);
            }
        }
        best.record();
    }

    log::debug!(
        "particle swarm finished: iterations={iterations} best={}",
        best.quality()
    );
    let result = best.into_result(iterations, reached_ideal);
    Ok(PsoResult {
        best: result.best,
        best_quality: result.best_quality,
        iterations,
        reached_ideal,
        history: result.history,
        swarm,
    })
}

/// Index of the particle with the best personal best among `i` and up to
/// `k` sampled peers.
fn best_informant<C, R: Rng>(swarm: &[Particle<C>], i: usize, k: usize, rng: &mut R) -> usize {
    let mut winner = i;
    for j in index::sample(rng, swarm.len(), k.min(swarm.len())) {
        if swarm[j].best_quality > swarm[winner].best_quality {
            winner = j;
        }
    }
    winner
}

/// The new velocity of `particle`.
fn velocity<P, R>(
    problem: &P,
    particle: &Particle<P::Candidate>,
    informant: &P::Candidate,
    global: &P::Candidate,
    config: &PsoConfig,
    rng: &mut R,
) -> P::Candidate
where
    P: VectorSpace,
    R: Rng,
{
    let x = &particle.position;
    let own = problem.random_scale(&problem.dif(&particle.best, x), config.beta, rng);
    let social = problem.random_scale(&problem.dif(informant, x), config.gamma, rng);
    let global = problem.random_scale(&problem.dif(global, x), config.delta, rng);
    let inertia = problem.mul(config.alpha, &particle.velocity);
    problem.sum(&problem.sum(&inertia, &own), &problem.sum(&social, &global))
}
