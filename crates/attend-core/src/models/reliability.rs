use serde::{Deserialize, Serialize};
use std::fmt;

use super::SourceKind;
use crate::constants::{RELIABILITY_MAX, RELIABILITY_MIN};
use crate::errors::{AttendError, AttendResult};

/// Trust in a prediction source, inversely related to its effective variance.
///
/// Values produced by [`Reliability::new`] (and therefore by every learning
/// update) are clamped to [0.3, 0.95]. [`Reliability::prior`] admits any value
/// in (0, 1] so an operator can seed a source as nearly untrusted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Reliability(f64);

impl Reliability {
    pub const MIN: f64 = RELIABILITY_MIN;
    pub const MAX: f64 = RELIABILITY_MAX;

    /// Create a learned reliability, clamping to [0.3, 0.95].
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Seed a reliability outside the learned range. Rejects values outside (0, 1].
    pub fn prior(value: f64) -> AttendResult<Self> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(AttendError::invalid_input(format!(
                "reliability prior must be in (0, 1], got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Reliability {
    fn default() -> Self {
        Self(0.8)
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<Reliability> for f64 {
    fn from(r: Reliability) -> Self {
        r.0
    }
}

/// One reliability per named source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceReliability {
    pub base: Reliability,
    pub weather: Reliability,
    pub ai: Reliability,
}

impl SourceReliability {
    pub fn new(base: Reliability, weather: Reliability, ai: Reliability) -> Self {
        Self { base, weather, ai }
    }

    pub fn get(&self, source: SourceKind) -> Reliability {
        match source {
            SourceKind::Base => self.base,
            SourceKind::Weather => self.weather,
            SourceKind::Ai => self.ai,
        }
    }

    pub fn set(&mut self, source: SourceKind, reliability: Reliability) {
        match source {
            SourceKind::Base => self.base = reliability,
            SourceKind::Weather => self.weather = reliability,
            SourceKind::Ai => self.ai = reliability,
        }
    }
}

impl Default for SourceReliability {
    fn default() -> Self {
        Self {
            base: Reliability::new(0.8),
            weather: Reliability::new(0.7),
            ai: Reliability::new(0.6),
        }
    }
}
