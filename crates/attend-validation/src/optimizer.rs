//! Grid-search weight optimizer with a paired significance test.

use tracing::debug;

use attend_core::config::DualTrackConfig;
use attend_core::errors::{AttendResult, OptimizationError};
use attend_core::models::{OptimizationProposal, OptimizationSample, Track, WeightConfiguration};
use attend_core::stats;
use attend_core::traits::IWeightOptimizer;

/// Scans `w_ai` in `grid_step` increments with `w_weather` held fixed and
/// `w_base` taking the remainder, minimizing mean absolute error.
///
/// The winner is compared with the current weights by a paired t-statistic on
/// per-sample error reductions. It is applied only when that statistic reaches
/// `significance_z` and the MAE drops by at least `min_improvement_pct`.
#[derive(Debug, Clone)]
pub struct GridSearchOptimizer {
    config: DualTrackConfig,
}

impl GridSearchOptimizer {
    pub fn new(config: DualTrackConfig) -> Self {
        Self { config }
    }

    /// Feasible candidates for a fixed weather weight.
    fn candidates(&self, w_weather: f64) -> Vec<WeightConfiguration> {
        let upper = self.config.max_ai_weight.min(1.0 - w_weather - self.config.min_base_weight);
        if upper < 0.0 {
            return Vec::new();
        }
        let steps = (upper / self.config.grid_step + 1e-9).floor() as usize;
        (0..=steps)
            .filter_map(|k| {
                let w_ai = k as f64 * self.config.grid_step;
                let w_base = 1.0 - w_weather - w_ai;
                WeightConfiguration::new(w_base, w_weather, w_ai, Track::Production).ok()
            })
            .collect()
    }
}

fn errors(weights: &WeightConfiguration, samples: &[OptimizationSample]) -> Vec<f64> {
    samples
        .iter()
        .map(|s| (weights.apply(&s.inputs) - s.actual).abs())
        .collect()
}

/// Paired t-statistic of `old - new`. Identical non-zero reductions count as
/// infinitely significant.
fn paired_t(old: &[f64], new: &[f64]) -> f64 {
    let diffs: Vec<f64> = old.iter().zip(new).map(|(o, n)| o - n).collect();
    let mean = stats::mean(&diffs);
    let sd = stats::sample_std_dev(&diffs);
    if sd == 0.0 {
        return if mean > 0.0 { f64::INFINITY } else { 0.0 };
    }
    mean / (sd / (diffs.len() as f64).sqrt())
}

impl IWeightOptimizer for GridSearchOptimizer {
    fn optimize(
        &self,
        samples: &[OptimizationSample],
        current: &WeightConfiguration,
    ) -> AttendResult<OptimizationProposal> {
        if samples.len() < self.config.min_samples {
            return Err(OptimizationError::InsufficientSamples {
                required: self.config.min_samples,
                available: samples.len(),
            }
            .into());
        }
        let current = current.with_track(Track::Production);
        let candidates = self.candidates(current.w_weather);
        if candidates.is_empty() {
            return Err(OptimizationError::NoFeasibleWeights {
                reason: format!(
                    "no w_ai in [0, {}] keeps w_base >= {} with w_weather = {}",
                    self.config.max_ai_weight, self.config.min_base_weight, current.w_weather
                ),
            }
            .into());
        }

        let old_errors = errors(&current, samples);
        let old_mae = stats::mean(&old_errors);

        // Start from the current weights so a flat objective keeps them.
        let mut best = current;
        let mut best_errors = old_errors.clone();
        let mut best_mae = old_mae;
        for candidate in candidates {
            let candidate_errors = errors(&candidate, samples);
            let mae = stats::mean(&candidate_errors);
            if mae < best_mae - 1e-12 {
                best = candidate;
                best_mae = mae;
                best_errors = candidate_errors;
            }
        }

        let improvement_percentage = if old_mae > 0.0 {
            (old_mae - best_mae) / old_mae * 100.0
        } else {
            0.0
        };
        let t = paired_t(&old_errors, &best_errors);
        let statistically_significant = t >= self.config.significance_z;
        let apply =
            statistically_significant && improvement_percentage >= self.config.min_improvement_pct;
        debug!(
            old_mae,
            new_mae = best_mae,
            improvement_percentage,
            t_statistic = t,
            apply,
            "grid search finished"
        );

        Ok(OptimizationProposal {
            new_weights: best,
            old_mae,
            new_mae: best_mae,
            improvement_percentage,
            statistically_significant,
            apply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_stay_within_caps() {
        let optimizer = GridSearchOptimizer::new(DualTrackConfig::default());
        let grid = optimizer.candidates(0.10);
        assert_eq!(grid.len(), 21);
        for w in &grid {
            assert!(w.w_ai <= 0.20 + 1e-9);
            assert!(w.w_base >= 0.70 - 1e-9);
            assert!((w.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn heavy_weather_weight_has_no_feasible_grid() {
        let optimizer = GridSearchOptimizer::new(DualTrackConfig::default());
        assert!(optimizer.candidates(0.35).is_empty());
    }

    #[test]
    fn paired_t_of_constant_gain_is_infinite() {
        assert!(paired_t(&[3.0, 3.0], &[1.0, 1.0]).is_infinite());
        assert_eq!(paired_t(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }
}
