//! Outlier-resistant estimators.

use serde::{Deserialize, Serialize};

use attend_core::constants::MAX_TOTAL_TRIM_FRACTION;
use attend_core::stats;

use super::ewma;

/// Mean after dropping `trim_percent` of the points from each end, never more
/// than 25% of the points in total.
pub fn trimmed_mean(values: &[f64], trim_percent: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len();
    let per_side = (n as f64 * trim_percent).floor() as usize;
    let cap = (n as f64 * MAX_TOTAL_TRIM_FRACTION / 2.0).floor() as usize;
    let k = per_side.min(cap);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    stats::mean(&sorted[k..n - k])
}

/// Result of the variance-filtered estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceFilterOutcome {
    pub value: f64,
    /// Points within the threshold of the median.
    pub kept: usize,
    pub discarded: usize,
    /// Fewer than half survived; `value` is the median.
    pub used_median: bool,
}

/// Drop points farther than `threshold·σ` from the median, then EWMA the
/// survivors in their original order. Falls back to the median when fewer
/// than half survive.
pub fn variance_filtered(values: &[f64], threshold: f64, alpha: f64) -> VarianceFilterOutcome {
    if values.is_empty() {
        return VarianceFilterOutcome {
            value: 0.0,
            kept: 0,
            discarded: 0,
            used_median: false,
        };
    }
    let median = stats::median(values);
    let limit = threshold * stats::std_dev(values);
    let survivors: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| (v - median).abs() <= limit)
        .collect();

    let kept = survivors.len();
    let discarded = values.len() - kept;
    if kept * 2 < values.len() {
        return VarianceFilterOutcome {
            value: median,
            kept,
            discarded,
            used_median: true,
        };
    }
    VarianceFilterOutcome {
        value: ewma(&survivors, alpha),
        kept,
        discarded,
        used_median: false,
    }
}
