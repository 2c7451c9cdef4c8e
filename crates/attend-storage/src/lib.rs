//! # attend-storage
//!
//! SQLite persistence layer implementing [`IPredictionStore`](attend_core::traits::IPredictionStore):
//! intraday point predictions, dual-track predictions, validation records,
//! weight configurations, and optimization events.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use attend_core::errors::{AttendError, StorageError};

/// Map any displayable SQLite failure into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> AttendError {
    AttendError::StorageError(StorageError::SqliteError { message })
}

/// A row that exists but cannot be decoded.
pub(crate) fn corrupt_row(table: &str, details: impl Into<String>) -> AttendError {
    AttendError::StorageError(StorageError::CorruptRow {
        table: table.to_string(),
        details: details.into(),
    })
}
