//! # attend-fusion
//!
//! Fuses a base forecast with weather- and AI-event-adjusted variants into one
//! posterior estimate. Two strategies: inverse-variance (precision) weighting and
//! a reliability-scaled additive blend. Per-source reliability is learned online
//! from realized errors or re-estimated in batch from history.

pub mod additive;
pub mod engine;
pub mod precision;
pub mod reliability;
pub mod sources;

pub use engine::BayesianFusionEngine;
pub use reliability::{ReliabilityHistory, ReliabilityObservation};
pub use sources::SanitizedInputs;
