use serde::{Deserialize, Serialize};

use super::PredictionInputs;
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::{AttendError, AttendResult};

/// Which of the two parallel weight configurations a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Production,
    Experimental,
}

impl Track {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Experimental => "experimental",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "production" => Some(Self::Production),
            "experimental" => Some(Self::Experimental),
            _ => None,
        }
    }
}

/// Linear fusion weights. Each weight is in [0, 1] and they sum to 1 (±1e-3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfiguration {
    pub w_base: f64,
    pub w_weather: f64,
    pub w_ai: f64,
    pub track: Track,
}

impl WeightConfiguration {
    pub fn new(w_base: f64, w_weather: f64, w_ai: f64, track: Track) -> AttendResult<Self> {
        for (name, w) in [("w_base", w_base), ("w_weather", w_weather), ("w_ai", w_ai)] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(AttendError::invalid_input(format!(
                    "{name} must be in [0, 1], got {w}"
                )));
            }
        }
        let sum = w_base + w_weather + w_ai;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AttendError::invalid_input(format!(
                "weights must sum to 1, got {sum:.6}"
            )));
        }
        Ok(Self {
            w_base,
            w_weather,
            w_ai,
            track,
        })
    }

    /// `w_base·base + w_weather·(base·weather) + w_ai·(base·ai)`.
    pub fn apply(&self, inputs: &PredictionInputs) -> f64 {
        let base = inputs.base_value;
        self.w_base * base
            + self.w_weather * (base * inputs.weather_factor)
            + self.w_ai * (base * inputs.ai_factor)
    }

    /// Same weights, tagged with another track.
    pub fn with_track(mut self, track: Track) -> Self {
        self.track = track;
        self
    }

    pub fn sum(&self) -> f64 {
        self.w_base + self.w_weather + self.w_ai
    }
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self {
            w_base: 0.80,
            w_weather: 0.10,
            w_ai: 0.10,
            track: Track::Production,
        }
    }
}
