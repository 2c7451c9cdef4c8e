use attend_core::config::EnsembleWeights;

/// Blend of EWMA, time-window, trimmed mean, and Kalman estimates.
///
/// Weights are validated to sum to 1 at config load; the blend still
/// normalizes so a hand-built config cannot scale the result.
pub fn ensemble(weights: &EnsembleWeights, ewma: f64, time_window: f64, trimmed_mean: f64, kalman: f64) -> f64 {
    let total = weights.sum();
    if total <= 0.0 {
        return (ewma + time_window + trimmed_mean + kalman) / 4.0;
    }
    (weights.ewma * ewma
        + weights.time_window * time_window
        + weights.trimmed_mean * trimmed_mean
        + weights.kalman * kalman)
        / total
}
