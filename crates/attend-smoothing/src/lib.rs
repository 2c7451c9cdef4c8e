//! # attend-smoothing
//!
//! Reduces the many point predictions issued through a day for one target date
//! into a single finalized value with CI80 / CI95.
//!
//! Seven estimators run side by side (simple mean, EWMA, confidence-weighted,
//! time-window weighted, trimmed mean, variance-filtered mean, 1-D Kalman) plus
//! an ensemble blend. The [`StabilityAnalyzer`] classifies intraday dispersion
//! and drives which estimator becomes the reported value.

pub mod engine;
pub mod interval;
pub mod methods;
pub mod recommend;
pub mod stability;

pub use engine::{IntradaySmoother, SmoothingResults};
pub use interval::{FinalInterval, IntervalBasis};
pub use methods::{TimeWeighting, VarianceFilterOutcome};
pub use stability::{Dispersion, StabilityAnalyzer};
