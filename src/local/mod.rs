//! Single-state local search.
//!
//! - [`LocalRunner::hill_climbing`]: accept a neighbor only if strictly better
//! - [`LocalRunner::steepest`]: best of `n` neighbors, accepted only if better
//! - [`LocalRunner::steepest_with_replacement`]: best of `n` neighbors, always accepted
//! - [`LocalRunner::random_search`]: fresh random candidate every iteration
//! - [`LocalRunner::hill_climbing_with_random_restarts`]
//! - [`LocalRunner::iterated_local_search`] and
//!   [`LocalRunner::iterated_local_search_with_random_restarts`]
//!
//! Minimizing ("hill falling") variants use [`Objective::Minimize`](crate::problem::Objective).
//!
//! # References
//!
//! Luke (2013), *Essentials of Metaheuristics*, 2nd ed., ch. 2

mod config;
mod ils;
mod runner;

pub(crate) use ils::climb;
pub use config::LocalConfig;
pub use runner::LocalRunner;
