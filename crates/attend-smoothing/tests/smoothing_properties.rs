use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use attend_core::config::SmoothingConfig;
use attend_core::models::PointPrediction;
use attend_smoothing::IntradaySmoother;

fn points(values: &[(f64, Option<f64>)]) -> Vec<PointPrediction> {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &(v, c))| PointPrediction {
            confidence: c,
            ..PointPrediction::new(v, t0 + Duration::minutes(30 * i as i64))
        })
        .collect()
}

proptest! {
    #[test]
    fn basic_estimators_stay_within_range(
        raw in proptest::collection::vec((1.0f64..1000.0, proptest::option::of(0.0f64..1.5)), 1..48)
    ) {
        let smoother = IntradaySmoother::new(SmoothingConfig::default()).unwrap();
        let pts = points(&raw);
        let r = smoother.compute_all(&pts, None);
        let lo = raw.iter().map(|(v, _)| *v).fold(f64::INFINITY, f64::min) - 1e-9;
        let hi = raw.iter().map(|(v, _)| *v).fold(f64::NEG_INFINITY, f64::max) + 1e-9;

        for v in [r.simple_average, r.ewma, r.trimmed_mean, r.confidence_weighted] {
            prop_assert!(v >= lo && v <= hi, "{} not in [{}, {}]", v, lo, hi);
        }
    }

    #[test]
    fn compute_all_is_deterministic(
        raw in proptest::collection::vec((0.0f64..500.0, proptest::option::of(0.0f64..1.0)), 0..48)
    ) {
        let smoother = IntradaySmoother::new(SmoothingConfig::default()).unwrap();
        let pts = points(&raw);
        prop_assert_eq!(smoother.compute_all(&pts, None), smoother.compute_all(&pts, None));
    }

    #[test]
    fn flag_matches_low_confidence(
        raw in proptest::collection::vec((1.0f64..1000.0, Just(None::<f64>)), 1..48)
    ) {
        let smoother = IntradaySmoother::new(SmoothingConfig::default()).unwrap();
        let values: Vec<f64> = raw.iter().map(|(v, _)| *v).collect();
        let m = smoother.compute_stability(&values).unwrap();
        prop_assert_eq!(m.flag_for_review, m.coefficient_of_variation >= 0.15);
    }
}
