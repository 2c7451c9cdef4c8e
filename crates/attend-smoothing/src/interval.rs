//! Final CI80 / CI95 for a smoothed day.

use serde::{Deserialize, Serialize};

use attend_core::constants::{Z_80, Z_95};
use attend_core::models::{Interval, PointPrediction, StabilityMetrics};
use attend_core::stats;

/// Where an interval's width came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalBasis {
    /// Mean width of the readings' own intervals.
    InputIntervals,
    /// No reading carried an interval at this level: `2·z·σ` of the values.
    Dispersion,
}

/// Unrounded final intervals, centered on the ensemble estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalInterval {
    pub ci80: Interval,
    pub ci95: Interval,
    pub ci80_basis: IntervalBasis,
    pub ci95_basis: IntervalBasis,
}

/// Width of one level before the `(1 + cv)` scaling.
fn base_width(
    points: &[PointPrediction],
    level: impl Fn(&PointPrediction) -> Option<Interval>,
    z: f64,
) -> (f64, IntervalBasis) {
    let widths: Vec<f64> = points
        .iter()
        .filter_map(&level)
        .map(|i| i.width())
        .filter(|w| w.is_finite())
        .collect();
    if widths.is_empty() {
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        (2.0 * z * stats::std_dev(&values), IntervalBasis::Dispersion)
    } else {
        (stats::mean(&widths), IntervalBasis::InputIntervals)
    }
}

/// Intervals centered on `center`, each as wide as the mean input width
/// scaled by `(1 + cv)`.
pub fn final_interval(
    points: &[PointPrediction],
    center: f64,
    stability: Option<&StabilityMetrics>,
) -> FinalInterval {
    let scale = 1.0 + stability.map(|s| s.coefficient_of_variation).unwrap_or(0.0);
    let (w80, ci80_basis) = base_width(points, |p| p.ci80, Z_80);
    let (w95, ci95_basis) = base_width(points, |p| p.ci95, Z_95);
    FinalInterval {
        ci80: Interval::centered(center, w80 * scale / 2.0),
        ci95: Interval::centered(center, w95 * scale / 2.0),
        ci80_basis,
        ci95_basis,
    }
}
