//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop;
//! [`GaVariant`] picks the next-population rule.

use crate::error::{check_budget, check_probability, SearchError};
use crate::operators::Selection;

/// How the next population is derived from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GaVariant {
    /// Select two parents, cross over, mutate both children, until the
    /// population is full. The whole population is replaced.
    #[default]
    Generational,

    /// The top `elites` individuals are copied unchanged; the remaining
    /// slots are bred as in [`Generational`](GaVariant::Generational).
    Elitist {
        elites: usize,
    },

    /// Each iteration breeds exactly two children and replaces two
    /// distinct members picked by `death` (applied to inverted fitness, so
    /// it favours the worst).
    SteadyState {
        death: Selection,
    },

    /// Each slot is a selected individual copied unchanged with probability
    /// `copy_probability`, otherwise a crossover child. No mutation stage.
    TreeStyle {
        copy_probability: f64,
    },
}

/// Configuration for the genetic algorithm family.
///
/// # Defaults
///
/// ```
/// use metaheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_iterations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use metaheur::ga::{GaConfig, GaVariant};
/// use metaheur::operators::Selection;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_variant(GaVariant::Elitist { elites: 10 })
///     .with_crossover_rate(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    /// Typical range: 50-500.
    pub population_size: usize,

    /// Generation budget. For [`GaVariant::SteadyState`] one iteration is
    /// one two-child replacement step.
    pub max_iterations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Probability of applying crossover to a pair of parents (0.0-1.0).
    ///
    /// When crossover is not applied, the children are copies of the
    /// parents (mutation still applies).
    pub crossover_rate: f64,

    /// Next-population rule.
    pub variant: GaVariant,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_iterations: 500,
            selection: Selection::default(),
            crossover_rate: 1.0,
            variant: GaVariant::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the next-population rule.
    pub fn with_variant(mut self, variant: GaVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
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
        if self.population_size < 2 {
            return Err(SearchError::PopulationTooSmall {
                required: 2,
                actual: self.population_size,
            });
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        match self.variant {
            GaVariant::Elitist { elites } if elites >= self.population_size => {
                Err(SearchError::invalid(
                    "elites",
                    format!(
                        "{elites} elites leave no room in a population of {}",
                        self.population_size
                    ),
                ))
            }
            GaVariant::TreeStyle { copy_probability } => {
                check_probability("copy_probability", copy_probability)
            }
            _ => Ok(()),
        }
    }
}
