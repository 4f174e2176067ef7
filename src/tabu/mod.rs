//! Tabu search (TS).
//!
//! A single-state trajectory method that keeps a bounded memory of recent
//! states (or move features) and refuses to return to them, preventing
//! cycling and pushing the search into unexplored regions.
//!
//! - [`TabuList`]: bounded FIFO memory with O(1) membership
//! - [`TabuRunner::run`]: tabu list of whole states
//! - [`TabuRunner::run_feature_based`]: tabu list of move features
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search - Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod runner;

pub use config::TabuConfig;
pub use memory::TabuList;
pub use runner::TabuRunner;
