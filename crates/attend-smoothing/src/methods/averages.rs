use attend_core::constants::{CONFIDENCE_WEIGHT_MAX, CONFIDENCE_WEIGHT_MIN};
use attend_core::models::PointPrediction;
use attend_core::stats;

/// Plain arithmetic mean.
pub fn simple_average(values: &[f64]) -> f64 {
    stats::mean(values)
}

/// Mean weighted by each reading's clamped confidence.
///
/// Returns `(value, used_fallback)`. When no reading carries a usable confidence
/// the simple mean is returned and `used_fallback` is true. Readings without a
/// confidence count at full weight when others have one.
pub fn confidence_weighted(points: &[PointPrediction]) -> (f64, bool) {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let usable = |c: &Option<f64>| c.filter(|c| c.is_finite());

    if points.iter().all(|p| usable(&p.confidence).is_none()) {
        return (simple_average(&values), true);
    }

    let weights: Vec<f64> = points
        .iter()
        .map(|p| {
            usable(&p.confidence)
                .unwrap_or(CONFIDENCE_WEIGHT_MAX)
                .clamp(CONFIDENCE_WEIGHT_MIN, CONFIDENCE_WEIGHT_MAX)
        })
        .collect();
    (stats::weighted_mean(&values, &weights), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn point(value: f64, confidence: Option<f64>) -> PointPrediction {
        PointPrediction {
            confidence,
            ..PointPrediction::new(value, Utc::now())
        }
    }

    #[test]
    fn no_confidence_falls_back_to_mean() {
        let pts = [point(100.0, None), point(200.0, None)];
        assert_eq!(confidence_weighted(&pts), (150.0, true));
    }

    #[test]
    fn confidence_is_clamped() {
        // 0.0 clamps to 0.1, 5.0 clamps to 1.0
        let pts = [point(100.0, Some(0.0)), point(200.0, Some(5.0))];
        let (v, fallback) = confidence_weighted(&pts);
        assert!(!fallback);
        assert!((v - (100.0 * 0.1 + 200.0) / 1.1).abs() < 1e-9);
    }
}
