//! Gradient procedure configuration.

use crate::error::{check_budget, SearchError};

/// Configuration shared by the gradient procedures.
///
/// # Examples
///
/// ```
/// use metaheur::gradient::GradientConfig;
///
/// let config = GradientConfig::default().with_alpha(0.05).with_tolerance(1e-10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientConfig {
    /// Step size.
    pub alpha: f64,

    /// Step budget; for the restart procedure, the number of restarts.
    pub max_iterations: usize,

    /// A run (or one restart) has converged once the gradient norm is at
    /// or below this value.
    pub tolerance: f64,

    /// Step cap of each restart.
    pub inner_steps: usize,

    /// Random seed for restart points (None uses a fixed default).
    pub seed: Option<u64>,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            max_iterations: 1000,
            tolerance: 1e-8,
            inner_steps: 1000,
            seed: None,
        }
    }
}

impl GradientConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_inner_steps(mut self, n: usize) -> Self {
        self.inner_steps = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_budget(self.max_iterations)?;
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SearchError::invalid(
                "alpha",
                format!("must be positive, got {}", self.alpha),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SearchError::invalid("tolerance", "must be finite and non-negative"));
        }
        if self.inner_steps == 0 {
            return Err(SearchError::invalid("inner_steps", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GradientConfig::default();
        assert!((config.alpha - 0.1).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(GradientConfig::default().with_alpha(0.0).validate().is_err());
        assert!(GradientConfig::default().with_tolerance(-1.0).validate().is_err());
        assert!(GradientConfig::default().with_inner_steps(0).validate().is_err());
        assert_eq!(
            GradientConfig::default().with_max_iterations(0).validate(),
            Err(SearchError::ZeroBudget)
        );
    }
}
