//! # attend-core
//!
//! Foundation crate for the attend forecast fusion layer.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod stats;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AttendConfig;
pub use errors::{AttendError, AttendResult};
pub use models::{
    FinalizedPrediction, FusionResult, Interval, PointPrediction, Reliability, SourceKind, Track,
    ValidationRecord, WeightConfiguration,
};
