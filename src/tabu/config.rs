//! Tabu search configuration.

use crate::error::{check_budget, SearchError};

/// Configuration parameters for tabu search.
///
/// # Examples
///
/// ```
/// use metaheur::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_size(7)
///     .with_samples(8);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_size, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Capacity of the tabu list.
    pub tabu_size: usize,
    /// Neighbors sampled per iteration.
    pub samples: usize,
    /// When every sampled neighbor is tabu, accept the best one anyway if
    /// it beats the best quality found so far.
    pub aspiration: bool,
    /// Random seed (None uses a fixed default).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tabu_size: 7,
            samples: 10,
            aspiration: true,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_size(mut self, size: usize) -> Self {
        self.tabu_size = size;
        self
    }

    /// Sets the number of neighbors sampled per iteration.
    pub fn with_samples(mut self, n: usize) -> Self {
        self.samples = n;
        self
    }

    /// Enables or disables aspiration.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TabuConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_budget_and_samples() {
        assert_eq!(
            TabuConfig::default().with_max_iterations(0).validate(),
            Err(SearchError::ZeroBudget)
        );
        assert!(matches!(
            TabuConfig::default().with_samples(0).validate(),
            Err(SearchError::InvalidParameter { name: "samples", .. })
        ));
    }

    #[test]
    fn test_zero_tabu_size_allowed() {
        assert!(TabuConfig::default().with_tabu_size(0).validate().is_ok());
    }
}
