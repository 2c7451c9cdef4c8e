use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{AttendError, AttendResult};
use crate::models::{Track, WeightConfiguration};

/// Dual-track validator and weight optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DualTrackConfig {
    /// Rolling evaluation window in days.
    pub window_days: u32,
    /// Validated samples required before optimization may run.
    pub min_samples: usize,
    /// Optimization is considered every `batch_size` validations.
    pub batch_size: usize,
    /// Weight mass moved from base to ai for the experimental track.
    pub experimental_shift: f64,
    pub min_base_weight: f64,
    pub max_ai_weight: f64,
    /// Production weights used when the store has none.
    pub default_w_base: f64,
    pub default_w_weather: f64,
    pub default_w_ai: f64,
    /// Grid step of the weight search.
    pub grid_step: f64,
    /// Paired t-statistic required to call an improvement significant.
    pub significance_z: f64,
    /// Minimum MAE improvement (percent) before new weights are applied.
    pub min_improvement_pct: f64,
    pub adopt_improvement: f64,
    pub adopt_win_rate: f64,
    pub partial_improvement: f64,
    pub partial_win_rate: f64,
    pub reject_improvement: f64,
}

impl Default for DualTrackConfig {
    fn default() -> Self {
        Self {
            window_days: defaults::DEFAULT_WINDOW_DAYS,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            experimental_shift: defaults::DEFAULT_EXPERIMENTAL_SHIFT,
            min_base_weight: defaults::DEFAULT_MIN_BASE_WEIGHT,
            max_ai_weight: defaults::DEFAULT_MAX_AI_WEIGHT,
            default_w_base: defaults::DEFAULT_W_BASE,
            default_w_weather: defaults::DEFAULT_W_WEATHER,
            default_w_ai: defaults::DEFAULT_W_AI,
            grid_step: defaults::DEFAULT_GRID_STEP,
            significance_z: defaults::DEFAULT_SIGNIFICANCE_Z,
            min_improvement_pct: defaults::DEFAULT_MIN_IMPROVEMENT_PCT,
            adopt_improvement: defaults::DEFAULT_ADOPT_IMPROVEMENT,
            adopt_win_rate: defaults::DEFAULT_ADOPT_WIN_RATE,
            partial_improvement: defaults::DEFAULT_PARTIAL_IMPROVEMENT,
            partial_win_rate: defaults::DEFAULT_PARTIAL_WIN_RATE,
            reject_improvement: defaults::DEFAULT_REJECT_IMPROVEMENT,
        }
    }
}

impl DualTrackConfig {
    /// The configured fallback production weights.
    pub fn default_weights(&self) -> AttendResult<WeightConfiguration> {
        WeightConfiguration::new(
            self.default_w_base,
            self.default_w_weather,
            self.default_w_ai,
            Track::Production,
        )
        .map_err(|e| AttendError::invalid_config("dual_track.default_w_*", e.to_string()))
    }

    pub fn validate(&self) -> AttendResult<()> {
        if self.window_days == 0 {
            return Err(AttendError::invalid_config("dual_track.window_days", "must be at least 1"));
        }
        if self.min_samples == 0 {
            return Err(AttendError::invalid_config("dual_track.min_samples", "must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(AttendError::invalid_config("dual_track.batch_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.experimental_shift) {
            return Err(AttendError::invalid_config("dual_track.experimental_shift", "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.min_base_weight) {
            return Err(AttendError::invalid_config("dual_track.min_base_weight", "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.max_ai_weight) {
            return Err(AttendError::invalid_config("dual_track.max_ai_weight", "must be in [0, 1]"));
        }
        let defaults = self.default_weights()?;
        if defaults.w_base < self.min_base_weight || defaults.w_ai > self.max_ai_weight {
            return Err(AttendError::invalid_config(
                "dual_track.default_w_*",
                "default weights violate min_base_weight / max_ai_weight",
            ));
        }
        if !(self.grid_step > 0.0 && self.grid_step <= 0.5) {
            return Err(AttendError::invalid_config("dual_track.grid_step", "must be in (0, 0.5]"));
        }
        if !(self.significance_z > 0.0) {
            return Err(AttendError::invalid_config("dual_track.significance_z", "must be positive"));
        }
        if !(self.min_improvement_pct >= 0.0) {
            return Err(AttendError::invalid_config("dual_track.min_improvement_pct", "must be non-negative"));
        }
        for (field, rate) in [
            ("dual_track.adopt_win_rate", self.adopt_win_rate),
            ("dual_track.partial_win_rate", self.partial_win_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AttendError::invalid_config(field, "must be in [0, 1]"));
            }
        }
        Ok(())
    }
}
