//! Differential evolution (DE).
//!
//! Mutation is driven by the population itself: each member is challenged
//! by a trial built from the scaled difference of two other members added
//! to a third, then crossed with the member. Replacement is greedy per slot.
//! Vector arithmetic comes from [`VectorSpace`](crate::problem::VectorSpace).
//!
//! # References
//!
//! Storn & Price (1997), "Differential Evolution - A Simple and Efficient
//! Heuristic for Global Optimization over Continuous Spaces"

mod config;
mod runner;

pub use config::DeConfig;
pub use runner::DeRunner;
