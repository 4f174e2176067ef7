//! Particle swarm optimization (PSO).
//!
//! Not generational: each [`Particle`] keeps its position, velocity, visit
//! history and personal best for the whole run. Velocities mix inertia
//! with randomly weighted pulls toward the particle's own best, the best
//! of a random set of informants, and the best found by the swarm.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Luke (2013), *Essentials of Metaheuristics*, 2nd ed., sec. 3.6

mod config;
mod runner;

pub use config::PsoConfig;
pub use runner::{Particle, PsoResult, PsoRunner};
