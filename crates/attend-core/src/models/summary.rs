use serde::{Deserialize, Serialize};

/// Error statistics of one track over the evaluation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStats {
    pub mae: f64,
    pub std_dev: f64,
}

/// What the accumulated evidence says about the experimental configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    AdoptExperimental,
    PartialAdoption,
    RejectExperimental,
    /// Keep collecting.
    Inconclusive,
}

impl Recommendation {
    pub fn describe(self) -> &'static str {
        match self {
            Self::AdoptExperimental => "adopt the experimental weights",
            Self::PartialAdoption => "partially shift production toward the experimental weights",
            Self::RejectExperimental => "reject the experimental weights",
            Self::Inconclusive => "inconclusive, keep collecting data",
        }
    }
}

/// Aggregate of recent validation records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub window_days: u32,
    pub sample_count: usize,
    pub production: TrackStats,
    pub experimental: TrackStats,
    /// `experimental wins / total`.
    pub experimental_win_rate: f64,
    /// `(production MAE - experimental MAE) / production MAE`.
    pub relative_improvement: f64,
    pub recommendation: Recommendation,
}
