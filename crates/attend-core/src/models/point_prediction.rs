use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed numeric interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Interval of the given half-width around `center`.
    pub fn centered(center: f64, half_width: f64) -> Self {
        let half = half_width.abs();
        Self {
            lower: center - half,
            upper: center + half,
        }
    }

    pub fn width(&self) -> f64 {
        (self.upper - self.lower).abs()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Round both bounds to whole counts.
    pub fn rounded(&self) -> Self {
        Self {
            lower: self.lower.round(),
            upper: self.upper.round(),
        }
    }
}

/// One of many predictions issued through a day for a single target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPrediction {
    pub value: f64,
    /// Issuer's self-reported confidence, nominally in [0, 1].
    pub confidence: Option<f64>,
    pub timestamp: DateTime<Utc>,
    /// The issuing model's own 80% interval for this reading.
    pub ci80: Option<Interval>,
    /// The issuing model's own 95% interval for this reading.
    pub ci95: Option<Interval>,
}

impl PointPrediction {
    /// A bare reading with no confidence and no interval.
    pub fn new(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            value,
            confidence: None,
            timestamp,
            ci80: None,
            ci95: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_intervals(mut self, ci80: Interval, ci95: Interval) -> Self {
        self.ci80 = Some(ci80);
        self.ci95 = Some(ci95);
        self
    }
}
