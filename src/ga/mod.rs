//! Genetic algorithm family.
//!
//! One runner covers four next-population rules selected by [`GaVariant`]:
//! generational replacement, elitism, steady-state replacement and the
//! tree-style copy-or-crossover scheme. The problem supplies quality,
//! termination and random generation; variation comes from any
//! [`Crossover`](crate::operators::Crossover) and
//! [`Mutator`](crate::operators::Mutator), parent choice from
//! [`Selection`](crate::operators::Selection).
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, variant)
//! - [`GaRunner`]: Executes the evolutionary loop
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*
//! - Koza (1992), *Genetic Programming* (tree-style breeding)

mod config;
mod runner;

pub use config::{GaConfig, GaVariant};
pub use runner::GaRunner;
