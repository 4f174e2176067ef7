//! Run outcome shared by the procedures without extra statistics.

/// Result of a search run.
///
/// Always well-formed: exhausting the budget yields the best candidate
/// observed so far.
#[derive(Debug, Clone)]
pub struct SearchResult<C> {
    /// The best candidate found during the entire run.
    pub best: C,

    /// Quality of `best`.
    pub best_quality: f64,

    /// Number of budget units consumed (iterations or generations).
    pub iterations: usize,

    /// Whether the run stopped because an ideal candidate was found.
    pub reached_ideal: bool,

    /// Best quality after initialization and after each iteration.
    ///
    /// Monotone under the run's objective.
    pub history: Vec<f64>,
}
