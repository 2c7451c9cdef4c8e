use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::{AttendError, AttendResult};

/// Blend weights of the ensemble meta-method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleWeights {
    pub ewma: f64,
    pub time_window: f64,
    pub trimmed_mean: f64,
    pub kalman: f64,
}

impl EnsembleWeights {
    pub fn sum(&self) -> f64 {
        self.ewma + self.time_window + self.trimmed_mean + self.kalman
    }
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            ewma: defaults::DEFAULT_ENSEMBLE_EWMA,
            time_window: defaults::DEFAULT_ENSEMBLE_TIME_WINDOW,
            trimmed_mean: defaults::DEFAULT_ENSEMBLE_TRIMMED_MEAN,
            kalman: defaults::DEFAULT_ENSEMBLE_KALMAN,
        }
    }
}

/// Intraday smoother configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// EWMA smoothing factor in (0, 1]; larger favors later predictions.
    pub ewma_alpha: f64,
    /// Share of points trimmed from each end by the trimmed mean.
    pub trim_percent: f64,
    /// Points farther than this many σ from the median are discarded.
    pub variance_threshold: f64,
    /// Kalman process noise `q`.
    pub kalman_process_noise: f64,
    /// Kalman measurement noise `r`.
    pub kalman_measurement_noise: f64,
    /// Kalman initial error covariance `p`.
    pub kalman_initial_covariance: f64,
    pub ensemble_weights: EnsembleWeights,
    /// Below this CV the simple mean is recommended.
    pub stable_cv: f64,
    /// Above this CV the variance-filtered mean is recommended.
    pub volatile_cv: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            ewma_alpha: defaults::DEFAULT_EWMA_ALPHA,
            trim_percent: defaults::DEFAULT_TRIM_PERCENT,
            variance_threshold: defaults::DEFAULT_VARIANCE_THRESHOLD,
            kalman_process_noise: defaults::DEFAULT_KALMAN_PROCESS_NOISE,
            kalman_measurement_noise: defaults::DEFAULT_KALMAN_MEASUREMENT_NOISE,
            kalman_initial_covariance: defaults::DEFAULT_KALMAN_INITIAL_COVARIANCE,
            ensemble_weights: EnsembleWeights::default(),
            stable_cv: defaults::DEFAULT_STABLE_CV,
            volatile_cv: defaults::DEFAULT_VOLATILE_CV,
        }
    }
}

impl SmoothingConfig {
    pub fn validate(&self) -> AttendResult<()> {
        if !(self.ewma_alpha > 0.0 && self.ewma_alpha <= 1.0) {
            return Err(AttendError::invalid_config("smoothing.ewma_alpha", "must be in (0, 1]"));
        }
        if !(0.0..0.5).contains(&self.trim_percent) {
            return Err(AttendError::invalid_config("smoothing.trim_percent", "must be in [0, 0.5)"));
        }
        if !(self.variance_threshold > 0.0) {
            return Err(AttendError::invalid_config("smoothing.variance_threshold", "must be positive"));
        }
        if !(self.kalman_process_noise > 0.0) {
            return Err(AttendError::invalid_config("smoothing.kalman_process_noise", "must be positive"));
        }
        if !(self.kalman_measurement_noise > 0.0) {
            return Err(AttendError::invalid_config("smoothing.kalman_measurement_noise", "must be positive"));
        }
        if !(self.kalman_initial_covariance > 0.0) {
            return Err(AttendError::invalid_config("smoothing.kalman_initial_covariance", "must be positive"));
        }
        let w = &self.ensemble_weights;
        if [w.ewma, w.time_window, w.trimmed_mean, w.kalman].iter().any(|x| !(*x >= 0.0)) {
            return Err(AttendError::invalid_config("smoothing.ensemble_weights", "must be non-negative"));
        }
        if (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AttendError::invalid_config(
                "smoothing.ensemble_weights",
                format!("must sum to 1, got {:.4}", w.sum()),
            ));
        }
        if !(self.stable_cv >= 0.0 && self.stable_cv < self.volatile_cv) {
            return Err(AttendError::invalid_config(
                "smoothing.stable_cv",
                "must be non-negative and below volatile_cv",
            ));
        }
        Ok(())
    }
}
