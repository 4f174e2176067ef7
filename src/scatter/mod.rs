//! Scatter search with path relinking.
//!
//! Maintains a small reference set that mixes the fittest candidates with
//! the most diverse ones. Every pair in the set is recombined, children
//! are refined by hill climbing, and the set is re-formed from old members
//! and children. Candidate distance comes from
//! [`Diversity`](crate::problem::Diversity).
//!
//! # References
//!
//! - Glover (1998), "A Template for Scatter Search and Path Relinking"
//! - Luke (2013), *Essentials of Metaheuristics*, 2nd ed., sec. 3.3.5

mod config;
mod runner;

pub use config::ScatterConfig;
pub use runner::ScatterRunner;
