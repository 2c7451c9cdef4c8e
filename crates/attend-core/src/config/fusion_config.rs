use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{AttendError, AttendResult};
use crate::models::{FusionStrategy, SourceKind, SourceReliability};

/// Bayesian fusion engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Global noise scale of a fully reliable source.
    pub base_std: f64,
    /// Step size of online reliability updates, in (0, 1].
    pub learning_rate: f64,
    /// Maximum number of reliability observations kept (FIFO).
    pub history_capacity: usize,
    /// Observations per source required before batch re-estimation.
    pub min_history_observations: usize,
    /// Starting reliability per source.
    pub initial_reliability: SourceReliability,
    pub strategy: FusionStrategy,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            base_std: defaults::DEFAULT_BASE_STD,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            history_capacity: defaults::DEFAULT_HISTORY_CAPACITY,
            min_history_observations: defaults::DEFAULT_MIN_HISTORY_OBSERVATIONS,
            initial_reliability: SourceReliability::default(),
            strategy: FusionStrategy::default(),
        }
    }
}

impl FusionConfig {
    pub fn validate(&self) -> AttendResult<()> {
        if !(self.base_std > 0.0 && self.base_std.is_finite()) {
            return Err(AttendError::invalid_config("fusion.base_std", "must be positive and finite"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(AttendError::invalid_config("fusion.learning_rate", "must be in (0, 1]"));
        }
        if self.history_capacity == 0 {
            return Err(AttendError::invalid_config("fusion.history_capacity", "must be at least 1"));
        }
        for source in SourceKind::ALL {
            let r = self.initial_reliability.get(source).value();
            if !(r > 0.0 && r <= 1.0) {
                return Err(AttendError::invalid_config(
                    format!("fusion.initial_reliability.{}", source.as_str()),
                    "must be in (0, 1]",
                ));
            }
        }
        Ok(())
    }
}
