//! Span definitions per operation: smoothing, fusion, validation, optimization.

/// Create a smoothing span.
#[macro_export]
macro_rules! smoothing_span {
    ($target_date:expr, $count:expr) => {
        tracing::info_span!("attend.smoothing", target_date = %$target_date, count = $count)
    };
}

/// Create a fusion span.
#[macro_export]
macro_rules! fusion_span {
    ($strategy:expr) => {
        tracing::info_span!("attend.fusion", strategy = ?$strategy)
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($date:expr) => {
        tracing::info_span!("attend.validation", date = %$date)
    };
}

/// Create an optimization span.
#[macro_export]
macro_rules! optimization_span {
    ($request_id:expr, $sample_count:expr) => {
        tracing::info_span!("attend.optimization", request_id = %$request_id, sample_count = $sample_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SMOOTHING: &str = "attend.smoothing";
    pub const FUSION: &str = "attend.fusion";
    pub const VALIDATION: &str = "attend.validation";
    pub const OPTIMIZATION: &str = "attend.optimization";
}
