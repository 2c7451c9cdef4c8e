use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Track;

/// Upstream inputs that produced a dual-track prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInputs {
    pub base_value: f64,
    pub weather_factor: f64,
    pub ai_factor: f64,
}

impl PredictionInputs {
    pub fn new(base_value: f64, weather_factor: f64, ai_factor: f64) -> Self {
        Self {
            base_value,
            weather_factor,
            ai_factor,
        }
    }
}

/// Both track predictions persisted for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredPredictionPair {
    pub date: NaiveDate,
    pub production: f64,
    pub experimental: f64,
    pub inputs: PredictionInputs,
}

/// Graded comparison of both tracks against the realized count.
///
/// Once one exists for a date, the stored pair for that date is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub date: NaiveDate,
    pub production_prediction: f64,
    pub experimental_prediction: f64,
    pub actual_value: f64,
    pub production_error: f64,
    pub experimental_error: f64,
    pub better_track: Track,
    /// `production_error - experimental_error`; positive when experimental wins.
    pub improvement: f64,
    pub validated_at: DateTime<Utc>,
}

impl ValidationRecord {
    /// Grade a stored pair. Ties go to production.
    pub fn grade(pair: &StoredPredictionPair, actual_value: f64, validated_at: DateTime<Utc>) -> Self {
        let production_error = (pair.production - actual_value).abs();
        let experimental_error = (pair.experimental - actual_value).abs();
        let better_track = if experimental_error < production_error {
            Track::Experimental
        } else {
            Track::Production
        };
        Self {
            date: pair.date,
            production_prediction: pair.production,
            experimental_prediction: pair.experimental,
            actual_value,
            production_error,
            experimental_error,
            better_track,
            improvement: production_error - experimental_error,
            validated_at,
        }
    }
}
