//! Differential evolution configuration.

use crate::error::{check_budget, SearchError};

/// Configuration for differential evolution (DE/rand/1).
///
/// # Examples
///
/// ```
/// use metaheur::de::DeConfig;
///
/// let config = DeConfig::default().with_population_size(40).with_alpha(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    /// Number of individuals. At least 4: every member needs three
    /// distinct others to build its donor.
    pub population_size: usize,

    /// Differential weight: donor = a + alpha * (b - c). Typical range 0.4-1.0.
    pub alpha: f64,

    /// Generation budget.
    pub max_iterations: usize,

    /// Whether to evaluate trial vectors in parallel using rayon.
    pub parallel: bool,

    /// Random seed (None uses a random seed).
    pub seed: Option<u64>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            alpha: 0.5,
            max_iterations: 500,
            parallel: true,
            seed: None,
        }
    }
}

impl DeConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_budget(self.max_iterations)?;
        if self.population_size < 4 {
            return Err(SearchError::PopulationTooSmall {
                required: 4,
                actual: self.population_size,
            });
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SearchError::invalid(
                "alpha",
                format!("must be positive, got {}", self.alpha),
            ));
        }
        Ok(())
    }
}
