//! Recency / time-of-day weighted mean.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use attend_core::models::{PointPrediction, SlotAccuracy, TimeSlot};
use attend_core::stats;

/// How the time-window weights were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWeighting {
    /// Historical accuracy per half-hour slot: `1 / max(1, MAE_slot)`.
    SlotAccuracy,
    /// No slot history available: weight rises linearly from 1 (oldest) to 2 (newest).
    Linear,
}

/// Weight per point, plus which scheme produced them.
///
/// Slot weighting applies when a non-empty accuracy map is supplied; points whose
/// slot has no history take weight 1.
pub fn time_window_weights(
    points: &[PointPrediction],
    slot_accuracy: Option<&BTreeMap<TimeSlot, SlotAccuracy>>,
) -> (Vec<f64>, TimeWeighting) {
    match slot_accuracy.filter(|m| !m.is_empty()) {
        Some(accuracy) => {
            let weights = points
                .iter()
                .map(|p| {
                    accuracy
                        .get(&TimeSlot::of(&p.timestamp))
                        .map(|a| 1.0 / a.mae.max(1.0))
                        .unwrap_or(1.0)
                })
                .collect();
            (weights, TimeWeighting::SlotAccuracy)
        }
        None => (linear_weights(points.len()), TimeWeighting::Linear),
    }
}

fn linear_weights(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| 1.0 + i as f64 / last).collect()
}

/// Weighted mean under [`time_window_weights`].
pub fn time_window(
    points: &[PointPrediction],
    slot_accuracy: Option<&BTreeMap<TimeSlot, SlotAccuracy>>,
) -> (f64, TimeWeighting) {
    let (weights, weighting) = time_window_weights(points, slot_accuracy);
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    (stats::weighted_mean(&values, &weights), weighting)
}
