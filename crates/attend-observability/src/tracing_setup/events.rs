//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with structured fields. The
//! `event` field is stable and safe to alert on.

/// A target date was finalized by the intraday smoother.
pub fn prediction_finalized(target_date: &str, value: f64, method: &str, source_count: usize) {
    tracing::info!(
        event = "prediction_finalized",
        target_date = %target_date,
        value = value,
        method = %method,
        source_count = source_count,
        "prediction finalized"
    );
}

/// A named fallback path was taken instead of the primary one.
pub fn fallback_used(component: &str, fallback: &str, reason: &str) {
    tracing::warn!(
        event = "fallback_used",
        component = %component,
        fallback = %fallback,
        reason = %reason,
        "fallback used"
    );
}

/// A source's reliability moved after grading.
pub fn reliability_updated(source: &str, previous: f64, current: f64, error: f64) {
    tracing::debug!(
        event = "reliability_updated",
        source = %source,
        previous = previous,
        current = current,
        error = error,
        "reliability updated"
    );
}

/// Both tracks were graded against an actual value.
pub fn validation_recorded(date: &str, production_error: f64, experimental_error: f64, better_track: &str) {
    tracing::info!(
        event = "validation_recorded",
        date = %date,
        production_error = production_error,
        experimental_error = experimental_error,
        better_track = %better_track,
        "validation recorded"
    );
}

/// An optimization request was handed to the queue.
pub fn optimization_enqueued(request_id: &str, sample_count: usize, window_days: u32) {
    tracing::info!(
        event = "optimization_enqueued",
        request_id = %request_id,
        sample_count = sample_count,
        window_days = window_days,
        "optimization enqueued"
    );
}

/// An optimization run finished and its event was persisted.
pub fn optimization_completed(request_id: &str, improvement_percentage: f64, significant: bool, applied: bool) {
    tracing::info!(
        event = "optimization_completed",
        request_id = %request_id,
        improvement_percentage = improvement_percentage,
        statistically_significant = significant,
        applied = applied,
        "optimization completed"
    );
}

/// An optimization run failed; weights were left untouched.
pub fn optimization_failed(request_id: &str, error: &str) {
    tracing::warn!(
        event = "optimization_failed",
        request_id = %request_id,
        error = %error,
        "optimization failed, weights unchanged"
    );
}
