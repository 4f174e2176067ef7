//! Evolution strategy configuration.

use crate::error::{check_budget, SearchError};

/// Survivor scheme of an evolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EsStrategy {
    /// (mu, lambda): the next population is only the `lambda` children.
    #[default]
    Comma,

    /// (mu + lambda): the `mu` parents survive alongside their `lambda`
    /// children.
    Plus,
}

/// Configuration for (mu, lambda) and (mu + lambda) evolution strategies.
///
/// Each generation the `mu` fittest individuals are kept as parents and
/// each produces `lambda / mu` mutated children.
///
/// # Examples
///
/// ```
/// use metaheur::es::{EsConfig, EsStrategy};
///
/// let config = EsConfig::default()
///     .with_mu(4)
///     .with_lambda(28)
///     .with_strategy(EsStrategy::Plus);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.population_size(), 32);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EsConfig {
    /// Number of parents kept each generation.
    pub mu: usize,

    /// Number of children bred each generation. Must be a multiple of `mu`.
    pub lambda: usize,

    /// Survivor scheme.
    pub strategy: EsStrategy,

    /// Generation budget.
    pub max_iterations: usize,

    /// Whether to evaluate children in parallel using rayon.
    pub parallel: bool,

    /// Random seed (None uses a random seed).
    pub seed: Option<u64>,
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            mu: 5,
            lambda: 20,
            strategy: EsStrategy::default(),
            max_iterations: 500,
            parallel: true,
            seed: None,
        }
    }
}

impl EsConfig {
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_strategy(mut self, strategy: EsStrategy) -> Self {
        self.strategy = strategy;
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

    /// Population size held between generations: `lambda` for
    /// [`EsStrategy::Comma`], `mu + lambda` for [`EsStrategy::Plus`].
    pub fn population_size(&self) -> usize {
        match self.strategy {
            EsStrategy::Comma => self.lambda,
            EsStrategy::Plus => self.mu + self.lambda,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_budget(self.max_iterations)?;
        if self.mu == 0 {
            return Err(SearchError::invalid("mu", "must be positive"));
        }
        if self.lambda < self.mu || self.lambda % self.mu != 0 {
            return Err(SearchError::invalid(
                "lambda",
                format!("must be a positive multiple of mu = {}, got {}", self.mu, self.lambda),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EsConfig::default();
        assert_eq!(config.strategy, EsStrategy::Comma);
        assert_eq!(config.population_size(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_plus_population_size() {
        let config = EsConfig::default().with_strategy(EsStrategy::Plus);
        assert_eq!(config.population_size(), 25);
    }

    #[test]
    fn test_validate() {
        assert!(EsConfig::default().with_mu(0).validate().is_err());
        assert!(EsConfig::default().with_lambda(22).validate().is_err());
        assert!(EsConfig::default().with_lambda(3).validate().is_err());
        assert_eq!(
            EsConfig::default().with_max_iterations(0).validate(),
            Err(SearchError::ZeroBudget)
        );
        assert!(EsConfig::default().with_mu(1).with_lambda(1).validate().is_ok());
    }
}
