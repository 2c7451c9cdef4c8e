use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Interval, StabilityMetrics};

/// The smoothing method that produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    SimpleAverage,
    Ewma,
    ConfidenceWeighted,
    TimeWindow,
    TrimmedMean,
    VarianceFiltered,
    Kalman,
    Ensemble,
}

impl SmoothingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SimpleAverage => "simple_average",
            Self::Ewma => "ewma",
            Self::ConfidenceWeighted => "confidence_weighted",
            Self::TimeWindow => "time_window",
            Self::TrimmedMean => "trimmed_mean",
            Self::VarianceFiltered => "variance_filtered",
            Self::Kalman => "kalman",
            Self::Ensemble => "ensemble",
        }
    }
}

/// One finalized value per target date, rounded to whole counts.
///
/// The intervals are always centered on the ensemble estimate, which may differ
/// from `value` when another method is recommended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedPrediction {
    pub target_date: NaiveDate,
    pub value: f64,
    pub ci80: Interval,
    pub ci95: Interval,
    pub smoothing_method: SmoothingMethod,
    pub source_count: usize,
    /// `None` when there were no inputs.
    pub stability: Option<StabilityMetrics>,
}
