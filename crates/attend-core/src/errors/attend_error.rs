use chrono::NaiveDate;

use super::{OptimizationError, StorageError};

/// Top-level error type for the fusion / smoothing / validation layer.
#[derive(Debug, thiserror::Error)]
pub enum AttendError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The insufficient-data case: grading was requested for a date that has no
    /// stored production/experimental pair.
    #[error("insufficient data: no stored prediction pair for {date}")]
    MissingPrediction { date: NaiveDate },

    #[error("predictions for {date} are already graded")]
    AlreadyGraded { date: NaiveDate },

    #[error("invalid config field {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("optimization error: {0}")]
    OptimizationError(#[from] OptimizationError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

impl AttendError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
