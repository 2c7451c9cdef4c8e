//! Reliability learning: per-observation updates, bounded history, batch re-estimation.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use attend_core::constants::RELIABILITY_MAX;
use attend_core::models::{Reliability, SourceKind, SourcePredictions, SourceReliability};

/// One graded date as seen by the reliability learner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityObservation {
    pub date: NaiveDate,
    pub actual: f64,
    pub predictions: SourcePredictions,
    /// Reliability after this observation was applied.
    pub reliability: SourceReliability,
}

/// FIFO history with a fixed capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityHistory {
    entries: VecDeque<ReliabilityObservation>,
    capacity: usize,
}

impl ReliabilityHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, observation: ReliabilityObservation) {
        self.entries.push_back(observation);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReliabilityObservation> {
        self.entries.iter()
    }

    /// Owned copy, oldest first.
    pub fn to_vec(&self) -> Vec<ReliabilityObservation> {
        self.entries.iter().copied().collect()
    }
}

/// One online step.
///
/// An error under the expected error `base_std / r` moves `r` toward 0.95 by
/// `lr·(0.95 - r)`; otherwise `r` decays by `lr·r·0.5`. The result is clamped.
pub fn updated_reliability(current: Reliability, error: f64, base_std: f64, learning_rate: f64) -> Reliability {
    let r = current.value();
    let expected_error = base_std / r;
    let next = if error < expected_error {
        r + learning_rate * (RELIABILITY_MAX - r)
    } else {
        r - learning_rate * r * 0.5
    };
    Reliability::new(next)
}

/// Batch estimate from a mean absolute error: `base_std / (MAE + base_std)`, clamped.
pub fn reliability_from_mae(mae: f64, base_std: f64) -> Reliability {
    Reliability::new(base_std / (mae + base_std))
}

/// Mean absolute error of `source` over the observations that carry it.
pub fn source_mae<'a>(
    observations: impl IntoIterator<Item = &'a ReliabilityObservation>,
    source: SourceKind,
) -> Option<(f64, usize)> {
    let errors: Vec<f64> = observations
        .into_iter()
        .filter_map(|o| o.predictions.get(source).map(|p| (p - o.actual).abs()))
        .filter(|e| e.is_finite())
        .collect();
    if errors.is_empty() {
        return None;
    }
    Some((errors.iter().sum::<f64>() / errors.len() as f64, errors.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32) -> ReliabilityObservation {
        ReliabilityObservation {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            actual: 100.0,
            predictions: SourcePredictions::default(),
            reliability: SourceReliability::default(),
        }
    }

    #[test]
    fn history_evicts_oldest() {
        let mut h = ReliabilityHistory::new(3);
        for day in 1..=5 {
            h.push(obs(day));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.iter().next().unwrap().date.to_string(), "2024-01-03");
    }

    #[test]
    fn good_prediction_raises_reliability() {
        let r = updated_reliability(Reliability::new(0.8), 5.0, 15.0, 0.1);
        assert!((r.value() - 0.815).abs() < 1e-12);
    }

    #[test]
    fn bad_prediction_decays_reliability() {
        let r = updated_reliability(Reliability::new(0.8), 50.0, 15.0, 0.1);
        assert!((r.value() - 0.76).abs() < 1e-12);
    }

    #[test]
    fn mae_estimate() {
        // 15 / (15 + 15) = 0.5
        assert_eq!(reliability_from_mae(15.0, 15.0).value(), 0.5);
        assert_eq!(reliability_from_mae(0.0, 15.0).value(), 0.95);
        assert_eq!(reliability_from_mae(1000.0, 15.0).value(), 0.3);
    }
}
