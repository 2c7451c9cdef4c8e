//! Per-call source construction from a base value and multiplicative factors.

use attend_core::constants::{AI_FACTOR_MAX, AI_FACTOR_MIN, WEATHER_FACTOR_MAX, WEATHER_FACTOR_MIN};
use attend_core::errors::{AttendError, AttendResult};
use attend_core::models::{FusionSource, SourceKind, SourceReliability};

/// Fusion inputs after validation and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SanitizedInputs {
    pub base_value: f64,
    pub ai_factor: f64,
    pub weather_factor: f64,
}

impl SanitizedInputs {
    /// Rejects a non-finite base. Non-finite factors read as neutral (1.0);
    /// factors are clamped to their ranges.
    pub fn new(base_value: f64, ai_factor: f64, weather_factor: f64) -> AttendResult<Self> {
        if !base_value.is_finite() {
            return Err(AttendError::invalid_input(format!(
                "base value must be finite, got {base_value}"
            )));
        }
        Ok(Self {
            base_value,
            ai_factor: clamp_factor(ai_factor, AI_FACTOR_MIN, AI_FACTOR_MAX),
            weather_factor: clamp_factor(weather_factor, WEATHER_FACTOR_MIN, WEATHER_FACTOR_MAX),
        })
    }
}

fn clamp_factor(factor: f64, min: f64, max: f64) -> f64 {
    if factor.is_finite() {
        factor.clamp(min, max)
    } else {
        1.0
    }
}

/// Variance of a source with reliability `r` before factor inflation.
pub fn base_variance(base_std: f64, r: f64) -> f64 {
    (base_std / r).powi(2)
}

/// The three sources for one call, in `SourceKind::ALL` order.
///
/// Adjusted sources are inflated by how far their factor moves from neutral:
/// weather by `1 + 2·|f-1|`, AI by `1 + 3·|f-1|`.
pub fn build_sources(
    inputs: &SanitizedInputs,
    reliability: &SourceReliability,
    base_std: f64,
) -> Vec<FusionSource> {
    let b = inputs.base_value;
    SourceKind::ALL
        .iter()
        .map(|&source| {
            let r = reliability.get(source).value();
            let (mean_estimate, inflation) = match source {
                SourceKind::Base => (b, 1.0),
                SourceKind::Weather => (
                    b * inputs.weather_factor,
                    1.0 + 2.0 * (inputs.weather_factor - 1.0).abs(),
                ),
                SourceKind::Ai => (b * inputs.ai_factor, 1.0 + 3.0 * (inputs.ai_factor - 1.0).abs()),
            };
            FusionSource {
                source,
                mean_estimate,
                variance: base_variance(base_std, r) * inflation,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_clamped_and_nan_is_neutral() {
        let s = SanitizedInputs::new(100.0, 2.0, f64::NAN).unwrap();
        assert_eq!(s.ai_factor, 1.3);
        assert_eq!(s.weather_factor, 1.0);
        let s = SanitizedInputs::new(100.0, 0.1, 0.5).unwrap();
        assert_eq!(s.ai_factor, 0.7);
        assert_eq!(s.weather_factor, 0.85);
    }

    #[test]
    fn non_finite_base_is_invalid() {
        assert!(SanitizedInputs::new(f64::INFINITY, 1.0, 1.0).is_err());
        assert!(SanitizedInputs::new(f64::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn variances_follow_reliability_and_inflation() {
        let inputs = SanitizedInputs::new(200.0, 1.1, 0.9).unwrap();
        let sources = build_sources(&inputs, &SourceReliability::default(), 15.0);
        let ai = sources.iter().find(|s| s.source == SourceKind::Ai).unwrap();
        assert!((ai.mean_estimate - 220.0).abs() < 1e-9);
        assert!((ai.variance - (15.0f64 / 0.6).powi(2) * 1.3).abs() < 1e-9);
        let weather = sources.iter().find(|s| s.source == SourceKind::Weather).unwrap();
        assert!((weather.variance - (15.0f64 / 0.7).powi(2) * 1.2).abs() < 1e-9);
    }
}
