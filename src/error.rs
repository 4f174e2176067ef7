//! Precondition failures reported at the runner boundary.
//!
//! The engine never retries or recovers internally. A [`SearchError`] is
//! returned before the first iteration when a configuration or an input
//! population cannot support a run. Exhausting the iteration budget is not
//! an error: runners then return the best candidate found so far.

/// Errors returned by runner entry points and config validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("iteration budget must be positive")]
    ZeroBudget,

    #[error("population must not be empty")]
    EmptyPopulation,

    #[error("population needs at least {required} individuals, got {actual}")]
    PopulationTooSmall { required: usize, actual: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("quality function returned NaN")]
    UndefinedQuality,
}

impl SearchError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SearchError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Checks that a probability lies in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, p: f64) -> Result<(), SearchError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SearchError::invalid(name, format!("{p} is not in [0, 1]")))
    }
}

/// Rejects a NaN quality value.
pub(crate) fn check_quality(q: f64) -> Result<f64, SearchError> {
    if q.is_nan() {
        Err(SearchError::UndefinedQuality)
    } else {
        Ok(q)
    }
}

/// Checks that a budget is positive.
pub(crate) fn check_budget(max_iterations: usize) -> Result<(), SearchError> {
    if max_iterations == 0 {
        Err(SearchError::ZeroBudget)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SearchError::ZeroBudget.to_string(),
            "iteration budget must be positive"
        );
        assert_eq!(
            SearchError::PopulationTooSmall {
                required: 4,
                actual: 2
            }
            .to_string(),
            "population needs at least 4 individuals, got 2"
        );
        assert_eq!(
            SearchError::invalid("alpha", "must be positive").to_string(),
            "invalid parameter `alpha`: must be positive"
        );
    }

    #[test]
    fn test_check_probability() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert!(check_probability("p", 1.5).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_check_quality() {
        assert_eq!(check_quality(1.5), Ok(1.5));
        assert_eq!(check_quality(f64::NEG_INFINITY), Ok(f64::NEG_INFINITY));
        assert_eq!(check_quality(f64::NAN), Err(SearchError::UndefinedQuality));
    }

    #[test]
    fn test_check_budget() {
        assert_eq!(check_budget(0), Err(SearchError::ZeroBudget));
        assert!(check_budget(1).is_ok());
    }
}
