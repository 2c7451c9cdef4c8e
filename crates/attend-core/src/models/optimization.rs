use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{PredictionInputs, WeightConfiguration};

/// One graded date as seen by the weight optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSample {
    pub date: NaiveDate,
    pub inputs: PredictionInputs,
    pub actual: f64,
}

/// Optimizer output before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationProposal {
    pub new_weights: WeightConfiguration,
    pub old_mae: f64,
    pub new_mae: f64,
    pub improvement_percentage: f64,
    pub statistically_significant: bool,
    /// Whether the new weights should replace production.
    pub apply: bool,
}

/// Metrics passed to the store alongside the proposed weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub evaluation_window_days: u32,
    pub sample_count: usize,
    pub old_weights: WeightConfiguration,
    pub improvement_percentage: f64,
    pub statistically_significant: bool,
    pub applied: bool,
}

/// Persisted record of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationEvent {
    pub id: String,
    pub evaluation_window_days: u32,
    pub sample_count: usize,
    pub old_weights: WeightConfiguration,
    pub new_weights: WeightConfiguration,
    pub improvement_percentage: f64,
    pub statistically_significant: bool,
    pub applied: bool,
    pub created_at: DateTime<Utc>,
}

impl OptimizationEvent {
    pub fn new(new_weights: WeightConfiguration, metrics: &OptimizationMetrics) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            evaluation_window_days: metrics.evaluation_window_days,
            sample_count: metrics.sample_count,
            old_weights: metrics.old_weights,
            new_weights,
            improvement_percentage: metrics.improvement_percentage,
            statistically_significant: metrics.statistically_significant,
            applied: metrics.applied,
            created_at: Utc::now(),
        }
    }
}
