use serde::{Deserialize, Serialize};

/// Coarse confidence bucket derived from the coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceLevel {
    High,
    MediumHigh,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Bucket a coefficient of variation: `<0.05` high, `<0.10` medium-high,
    /// `<0.15` medium, otherwise low.
    pub fn from_cv(cv: f64) -> Self {
        if cv < 0.05 {
            Self::High
        } else if cv < 0.10 {
            Self::MediumHigh
        } else if cv < 0.15 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::MediumHigh => "medium-high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Dispersion statistics over a set of same-day predictions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityMetrics {
    pub coefficient_of_variation: f64,
    pub confidence_level: ConfidenceLevel,
    /// True iff `confidence_level == Low`.
    pub flag_for_review: bool,
}

impl StabilityMetrics {
    pub fn from_cv(cv: f64) -> Self {
        let confidence_level = ConfidenceLevel::from_cv(cv);
        Self {
            coefficient_of_variation: cv,
            confidence_level,
            flag_for_review: confidence_level == ConfidenceLevel::Low,
        }
    }
}
