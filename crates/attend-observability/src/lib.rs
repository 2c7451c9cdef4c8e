//! # attend-observability
//!
//! Structured tracing for the forecast fusion layer: subscriber setup driven by
//! `ATTEND_LOG` or [`ObservabilityConfig`](attend_core::config::ObservabilityConfig),
//! span macros per operation, and named events for smoothing, fusion, validation,
//! and weight optimization.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
