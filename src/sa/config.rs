//! SA configuration, cooling schedules and reheating.

use crate::error::{check_budget, SearchError};

/// Cooling schedule for temperature reduction.
///
/// Applied once per iteration.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling over the iteration budget
/// - LundyMees: Lundy & Mees (1986), with convergence proof
///
/// Any other schedule can be supplied as [`CoolingSchedule::Custom`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Typical `alpha`: 0.95-0.999.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / max_iterations`.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },

    /// Caller schedule: receives the current temperature and the zero-based
    /// cooling step, returns the next temperature.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(f64, usize) -> f64),
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.99 }
    }
}

impl CoolingSchedule {
    /// Temperature after cooling step `step` (zero-based) from `temperature`.
    pub fn cool(&self, temperature: f64, step: usize, config: &SaConfig) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear => {
                let span = config.initial_temperature - config.min_temperature;
                let t = config.initial_temperature
                    - (step + 1) as f64 * span / config.max_iterations as f64;
                t.max(config.min_temperature)
            }
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
            CoolingSchedule::Custom(schedule) => schedule(temperature, step),
        }
    }
}

/// Reheating rule: raises the temperature mid-run to re-enable uphill moves.
///
/// When a reheat fires it replaces that iteration's cooling step.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reheating {
    /// Restores the initial temperature every `period` iterations.
    Periodic {
        period: usize,
    },

    /// After `patience` iterations without a new best, raises the
    /// temperature to `fraction * T_0` (if it is lower) and starts counting
    /// again.
    Stagnation {
        patience: usize,
        fraction: f64,
    },

    /// Caller rule that takes over temperature control entirely: every
    /// iteration the temperature becomes `rule(T_0, T)` and the cooling
    /// schedule is not consulted. A step that raises the temperature counts
    /// as a reheat.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(f64, f64) -> f64),
}

/// Configuration for simulated annealing.
///
/// # Examples
///
/// ```
/// use metaheur::sa::{CoolingSchedule, Reheating, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_reheating(Reheating::Periodic { period: 500 })
///     .with_max_iterations(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The run stops once the temperature falls to this value or below.
    /// Zero means only the budget or an ideal state stops the run.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Optional reheating rule.
    pub reheating: Option<Reheating>,

    /// Iteration budget.
    pub max_iterations: usize,

    /// Random seed (None uses a fixed default).
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            reheating: None,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_reheating(mut self, reheating: Reheating) -> Self {
        self.reheating = Some(reheating);
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

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_budget(self.max_iterations)?;
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(SearchError::invalid("initial_temperature", "must be positive"));
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err(SearchError::invalid("min_temperature", "must not be negative"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(SearchError::invalid(
                "min_temperature",
                "must be less than initial_temperature",
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 => {
                return Err(SearchError::invalid(
                    "alpha",
                    format!("geometric alpha must be in (0, 1), got {alpha}"),
                ));
            }
            CoolingSchedule::LundyMees { beta } if beta.is_nan() || beta <= 0.0 => {
                return Err(SearchError::invalid(
                    "beta",
                    format!("lundy-mees beta must be positive, got {beta}"),
                ));
            }
            _ => {}
        }
        match self.reheating {
            Some(Reheating::Periodic { period: 0 }) => {
                return Err(SearchError::invalid("period", "must be positive"));
            }
            Some(Reheating::Stagnation { patience, fraction }) => {
                if patience == 0 {
                    return Err(SearchError::invalid("patience", "must be positive"));
                }
                if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
                    return Err(SearchError::invalid(
                        "fraction",
                        format!("must be in (0, 1], got {fraction}"),
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.min_temperature - 1e-6).abs() < 1e-15);
        assert!(config.reheating.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_temperature_allowed() {
        assert!(SaConfig::default().with_min_temperature(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_beta() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::LundyMees { beta: -1.0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_reheating() {
        let periodic = SaConfig::default().with_reheating(Reheating::Periodic { period: 0 });
        assert!(periodic.validate().is_err());
        let stagnation = SaConfig::default().with_reheating(Reheating::Stagnation {
            patience: 10,
            fraction: 1.5,
        });
        assert!(stagnation.validate().is_err());
        let ok = SaConfig::default().with_reheating(Reheating::Stagnation {
            patience: 10,
            fraction: 0.5,
        });
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_zero_budget() {
        let config = SaConfig::default().with_max_iterations(0);
        assert_eq!(config.validate(), Err(SearchError::ZeroBudget));
    }

    #[test]
    fn test_schedules() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(0.0)
            .with_max_iterations(10);
        let geo = CoolingSchedule::Geometric { alpha: 0.5 };
        assert!((geo.cool(10.0, 0, &config) - 5.0).abs() < 1e-12);

        assert!((CoolingSchedule::Linear.cool(10.0, 0, &config) - 9.0).abs() < 1e-12);
        assert!((CoolingSchedule::Linear.cool(1.0, 9, &config) - 0.0).abs() < 1e-12);
        assert_eq!(CoolingSchedule::Linear.cool(0.0, 20, &config), 0.0);

        let lm = CoolingSchedule::LundyMees { beta: 0.1 };
        assert!((lm.cool(10.0, 0, &config) - 5.0).abs() < 1e-12);

        let stepped = CoolingSchedule::Custom(|t, step| t - step as f64);
        assert_eq!(stepped.cool(10.0, 3, &config), 7.0);
    }

    #[test]
    fn test_custom_rules_validate() {
        let config = SaConfig::default()
            .with_cooling(CoolingSchedule::Custom(|t, _| t * 0.5))
            .with_reheating(Reheating::Custom(|t0, t| if t < 1.0 { t0 } else { t * 0.9 }));
        assert!(config.validate().is_ok());
    }
}
