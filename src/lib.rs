//! Representation-agnostic metaheuristic search.
//!
//! Every procedure is generic over a caller-defined candidate type and
//! only touches it through small capability traits in [`problem`], so the
//! same loops serve bit strings, real vectors, permutations or trees.
//!
//! Single-state procedures:
//!
//! - **Local search** ([`local`]): hill climbing, steepest ascent (with and
//!   without replacement), random search, random restarts, iterated local
//!   search.
//! - **Simulated Annealing** ([`sa`]): Metropolis acceptance with
//!   pluggable cooling schedules and optional reheating.
//! - **Tabu Search** ([`tabu`]): whole-state and feature-based tabu lists.
//! - **Gradient methods** ([`gradient`]): ascent, descent, Newton, restarts.
//!
//! Population procedures:
//!
//! - **Genetic Algorithm** ([`ga`]): generational, elitist, steady-state
//!   and tree-style variants with pluggable selection, crossover and
//!   mutation.
//! - **Evolution Strategies** ([`es`]): (mu, lambda) and (mu + lambda).
//! - **Differential Evolution** ([`de`]).
//! - **Particle Swarm Optimization** ([`pso`]).
//! - **Scatter Search** ([`scatter`]) with path relinking.
//!
//! Shared building blocks live in [`operators`] (selection, crossover,
//! recombination, mutation, vector utilities, Pareto dominance) and
//! [`population`] (scoring, ranking, the running best).
//!
//! # Conventions
//!
//! - Higher quality is better unless a procedure takes an
//!   [`Objective::Minimize`](problem::Objective).
//! - Runners validate their config and initial candidates before the first
//!   iteration and return [`SearchError`] on a precondition failure.
//!   Exhausting the budget is not an error.
//! - Runs are reproducible given `config.seed`.

pub mod de;
pub mod error;
pub mod es;
pub mod ga;
pub mod gradient;
pub mod local;
pub mod operators;
pub mod population;
pub mod problem;
pub mod pso;
pub mod random;
pub mod result;
pub mod sa;
pub mod scatter;
pub mod tabu;

pub use error::SearchError;
pub use result::SearchResult;
