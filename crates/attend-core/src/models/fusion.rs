use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Interval;

/// Named prediction sources fused by the Bayesian engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Base,
    Weather,
    Ai,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Base, SourceKind::Weather, SourceKind::Ai];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Weather => "weather",
            Self::Ai => "ai",
        }
    }
}

/// Fusion strategy. Both remain selectable; neither replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FusionStrategy {
    /// Inverse-variance (precision) weighting.
    #[default]
    Precision,
    /// Base plus reliability-scaled multiplicative adjustments.
    Additive,
}

/// A source's mean estimate and variance for one fusion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionSource {
    pub source: SourceKind,
    pub mean_estimate: f64,
    pub variance: f64,
}

/// Posterior estimate produced by one fusion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub strategy: FusionStrategy,
    pub posterior_mean: f64,
    pub posterior_variance: f64,
    pub ci80: Interval,
    pub ci95: Interval,
    pub sources: Vec<FusionSource>,
    /// Normalized per-source weight; sums to 1.
    pub weights: BTreeMap<SourceKind, f64>,
    /// `weight * mean` per source, for explainability.
    pub contributions: BTreeMap<SourceKind, f64>,
}

impl FusionResult {
    pub fn weight(&self, source: SourceKind) -> f64 {
        self.weights.get(&source).copied().unwrap_or(0.0)
    }

    pub fn posterior_std(&self) -> f64 {
        self.posterior_variance.max(0.0).sqrt()
    }
}

/// What each source predicted for a date, as graded by `update_reliability`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePredictions {
    pub base: Option<f64>,
    pub weather: Option<f64>,
    pub ai: Option<f64>,
}

impl SourcePredictions {
    pub fn get(&self, source: SourceKind) -> Option<f64> {
        match source {
            SourceKind::Base => self.base,
            SourceKind::Weather => self.weather,
            SourceKind::Ai => self.ai,
        }
    }

    /// The per-source means of a fusion result.
    pub fn from_result(result: &FusionResult) -> Self {
        let mut out = Self::default();
        for s in &result.sources {
            match s.source {
                SourceKind::Base => out.base = Some(s.mean_estimate),
                SourceKind::Weather => out.weather = Some(s.mean_estimate),
                SourceKind::Ai => out.ai = Some(s.mean_estimate),
            }
        }
        out
    }
}
