//! Gradient-based procedures.
//!
//! - [`GradientRunner::ascent`] / [`GradientRunner::descent`]
//! - [`GradientRunner::newton`]
//! - [`GradientRunner::with_restarts`]: repeated ascent or descent from
//!   random points, keeping the best end point
//!
//! Vector arithmetic, gradients and the Newton direction come from
//! [`Gradient`](crate::problem::Gradient).

mod config;
mod runner;

pub use config::GradientConfig;
pub use runner::GradientRunner;
