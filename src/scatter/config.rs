//! Scatter search configuration.

use crate::error::{check_budget, SearchError};

/// Configuration for scatter search with path relinking.
///
/// # Examples
///
/// ```
/// use metaheur::scatter::ScatterConfig;
///
/// let config = ScatterConfig::default()
///     .with_fitness_count(4)
///     .with_diversity_count(3)
///     .with_refinement_steps(20);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.reference_size(), 7);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScatterConfig {
    /// Size of the initial population (seeds plus random candidates).
    pub initial_size: usize,

    /// Members of the reference set chosen by fitness.
    pub fitness_count: usize,

    /// Members of the reference set chosen for diversity.
    pub diversity_count: usize,

    /// Hill-climbing tweaks spent refining each candidate.
    pub refinement_steps: usize,

    /// Iteration budget; one iteration recombines every pair of the
    /// reference set once.
    pub max_iterations: usize,

    /// Random seed (None uses a random seed).
    pub seed: Option<u64>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            initial_size: 30,
            fitness_count: 5,
            diversity_count: 5,
            refinement_steps: 20,
            max_iterations: 50,
            seed: None,
        }
    }
}

impl ScatterConfig {
    pub fn with_initial_size(mut self, n: usize) -> Self {
        self.initial_size = n;
        self
    }

    pub fn with_fitness_count(mut self, n: usize) -> Self {
        self.fitness_count = n;
        self
    }

    pub fn with_diversity_count(mut self, n: usize) -> Self {
        self.diversity_count = n;
        self
    }

    pub fn with_refinement_steps(mut self, n: usize) -> Self {
        self.refinement_steps = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the reference set.
    pub fn reference_size(&self) -> usize {
        self.fitness_count + self.diversity_count
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_budget(self.max_iterations)?;
        if self.fitness_count == 0 {
            return Err(SearchError::invalid("fitness_count", "must be positive"));
        }
        if self.reference_size() < 2 {
            return Err(SearchError::invalid(
                "diversity_count",
                "the reference set needs at least two members",
            ));
        }
        if self.initial_size < self.reference_size() {
            return Err(SearchError::PopulationTooSmall {
                required: self.reference_size(),
                actual: self.initial_size,
            });
        }
        Ok(())
    }
}
