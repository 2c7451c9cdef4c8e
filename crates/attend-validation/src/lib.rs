//! # attend-validation
//!
//! Runs a production and an experimental weight configuration side by side,
//! grades both once the actual count arrives, and decides when enough evidence
//! exists to re-optimize the production weights.
//!
//! Optimization is decoupled through an explicit queue: the validator enqueues
//! an [`OptimizationRequest`], an [`OptimizationWorker`] consumes it on the tokio
//! runtime, persists an `OptimizationEvent`, and only then swaps the shared
//! production weights.

pub mod engine;
pub mod optimizer;
pub mod queue;
pub mod state;
pub mod summary;
pub mod trigger;
pub mod weights;
pub mod worker;

pub use engine::{DualTrackPrediction, DualTrackValidator, ValidationOutcome};
pub use optimizer::GridSearchOptimizer;
pub use queue::{optimization_channel, EnqueueOutcome, OptimizationQueue, OptimizationReceiver, OptimizationRequest};
pub use state::ValidatorState;
pub use trigger::TriggerDecision;
pub use weights::{derive_experimental, BoundaryClaim, DualTrackContext, DualTrackWeights};
pub use worker::OptimizationWorker;
