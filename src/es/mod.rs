//! Evolution strategies: (mu, lambda) and (mu + lambda).
//!
//! Truncation selection keeps the `mu` fittest individuals, each of which
//! breeds `lambda / mu` mutated children. The comma scheme discards the
//! parents; the plus scheme keeps them, which makes it elitist.
//!
//! # References
//!
//! - Rechenberg (1973), *Evolutionsstrategie*
//! - Schwefel (1981), *Numerical Optimization of Computer Models*
//! - Beyer & Schwefel (2002), "Evolution strategies: A comprehensive introduction"

mod config;
mod runner;

pub use config::{EsConfig, EsStrategy};
pub use runner::EsRunner;
