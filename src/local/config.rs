//! Local search configuration.

use crate::error::{check_budget, SearchError};
use crate::problem::Objective;

/// Configuration shared by the hill-climbing family and iterated local search.
///
/// # Examples
///
/// ```
/// use metaheur::local::LocalConfig;
/// use metaheur::problem::Objective;
///
/// let config = LocalConfig::default()
///     .with_max_iterations(500)
///     .with_samples(4)
///     .with_objective(Objective::Minimize);
/// assert_eq!(config.samples, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalConfig {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Neighbors sampled per step by the steepest variants.
    pub samples: usize,
    /// Hill-climbing steps used to refine each iterated-local-search base point.
    pub local_steps: usize,
    /// Maximize (climbing) or minimize (falling).
    pub objective: Objective,
    /// Random seed (None uses a fixed default).
    pub seed: Option<u64>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            samples: 10,
            local_steps: 20,
            objective: Objective::Maximize,
            seed: None,
        }
    }
}

impl LocalConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the neighbors sampled per steepest step.
    pub fn with_samples(mut self, n: usize) -> Self {
        self.samples = n;
        self
    }

    /// Sets the refinement length for iterated local search.
    pub fn with_local_steps(mut self, n: usize) -> Self {
        self.local_steps = n;
        self
    }

    /// Sets the objective direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_budget(self.max_iterations)?;
        if self.samples == 0 {
            return Err(SearchError::invalid("samples", "at least one neighbor must be sampled"));
        }
        if self.local_steps == 0 {
            return Err(SearchError::invalid("local_steps", "must be positive"));
        }
        Ok(())
    }
}
