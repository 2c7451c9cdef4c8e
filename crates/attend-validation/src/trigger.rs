use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// What `check_optimization_trigger` decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum TriggerDecision {
    /// A request was handed to the queue.
    Enqueued { request_id: String, count: usize },
    /// Fewer than `min_samples` validations in the window.
    NotReady { count: usize },
    /// Past the minimum but not on a batch boundary.
    BetweenBatches { count: usize },
    /// A run already fired at this count; waits for the next boundary.
    AlreadyFired { count: usize },
    /// The graded date lies outside the evaluation window, so the count did not move.
    OutsideWindow,
    /// A previous run is still in flight; this boundary is skipped.
    InFlight { count: usize },
    /// No queue attached or the worker is gone.
    WorkerUnavailable { count: usize },
    /// The in-window count could not be read.
    CountUnavailable,
}

impl TriggerDecision {
    pub fn fired(&self) -> bool {
        matches!(self, Self::Enqueued { .. })
    }
}

/// `count ≥ min_samples` and `count` falls on a batch boundary.
pub fn is_batch_boundary(count: usize, min_samples: usize, batch_size: usize) -> bool {
    batch_size > 0 && count >= min_samples && count % batch_size == 0
}

/// Whether `date` falls in the window `[today - window_days, ∞)`.
pub fn in_window(date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    match today.checked_sub_days(Days::new(u64::from(window_days))) {
        Some(start) => date >= start,
        None => true,
    }
}
