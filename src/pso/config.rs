//! Particle swarm configuration.

use crate::error::{check_budget, SearchError};

/// Configuration for particle swarm optimization.
///
/// Velocity update per particle, with each pull scaled component-wise by
/// an independent draw from `[0, bound]`:
///
/// ```text
/// v <- alpha * v + U(0, beta) * (personal - x)
///                + U(0, gamma) * (informant - x)
///                + U(0, delta) * (global - x)
/// x <- x + epsilon * v
/// ```
///
/// # Examples
///
/// ```
/// use metaheur::pso::PsoConfig;
///
/// let config = PsoConfig::default().with_swarm_size(20).with_informants(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Inertia: fraction of the previous velocity retained.
    pub alpha: f64,

    /// Upper bound of the pull toward the particle's own best position.
    pub beta: f64,

    /// Upper bound of the pull toward the best informant position.
    pub gamma: f64,

    /// Upper bound of the pull toward the best position found by anyone.
    pub delta: f64,

    /// Step size applied to the velocity when moving.
    pub epsilon: f64,

    /// Peers sampled per particle per iteration as informants. The particle
    /// itself always counts as one of its informants.
    pub informants: usize,

    /// Iteration budget.
    pub max_iterations: usize,

    /// Whether to evaluate positions in parallel using rayon.
    pub parallel: bool,

    /// Random seed (None uses a random seed).
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            alpha: 0.7,
            beta: 1.5,
            gamma: 1.0,
            delta: 0.5,
            epsilon: 1.0,
            informants: 3,
            max_iterations: 500,
            parallel: true,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_informants(mut self, n: usize) -> Self {
        self.informants = n;
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
        if self.swarm_size == 0 {
            return Err(SearchError::EmptyPopulation);
        }
        if self.informants == 0 {
            return Err(SearchError::invalid("informants", "must be positive"));
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("delta", self.delta),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::invalid(
                    name,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SearchError::invalid(
                "epsilon",
                format!("must be positive, got {}", self.epsilon),
            ));
        }
        Ok(())
    }
}
