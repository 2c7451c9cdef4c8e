mod attend_error;
mod optimization_error;
mod storage_error;

pub use attend_error::AttendError;
pub use optimization_error::OptimizationError;
pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type AttendResult<T> = Result<T, AttendError>;
