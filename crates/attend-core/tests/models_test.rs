use attend_core::models::*;
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;

#[test]
fn stability_buckets() {
    assert_eq!(StabilityMetrics::from_cv(0.04).confidence_level, ConfidenceLevel::High);
    assert_eq!(StabilityMetrics::from_cv(0.07).confidence_level, ConfidenceLevel::MediumHigh);
    assert_eq!(StabilityMetrics::from_cv(0.12).confidence_level, ConfidenceLevel::Medium);
    let low = StabilityMetrics::from_cv(0.20);
    assert_eq!(low.confidence_level, ConfidenceLevel::Low);
    assert!(low.flag_for_review);
}

#[test]
fn grading_prefers_experimental_when_closer() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let pair = StoredPredictionPair {
        date,
        production: 255.0,
        experimental: 263.0,
        inputs: PredictionInputs::new(250.0, 1.0, 1.0),
    };
    let record = ValidationRecord::grade(&pair, 260.0, Utc::now());
    assert_eq!(record.production_error, 5.0);
    assert_eq!(record.experimental_error, 3.0);
    assert_eq!(record.better_track, Track::Experimental);
    assert_eq!(record.improvement, 2.0);
}

#[test]
fn grading_tie_goes_to_production() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let pair = StoredPredictionPair {
        date,
        production: 255.0,
        experimental: 265.0,
        inputs: PredictionInputs::new(250.0, 1.0, 1.0),
    };
    let record = ValidationRecord::grade(&pair, 260.0, Utc::now());
    assert_eq!(record.better_track, Track::Production);
    assert_eq!(record.improvement, 0.0);
}

#[test]
fn interval_helpers() {
    let i = Interval::centered(100.0, 10.4);
    assert!((i.width() - 20.8).abs() < 1e-9);
    assert!(i.contains(95.0));
    let r = i.rounded();
    assert_eq!(r.lower, 90.0);
    assert_eq!(r.upper, 110.0);
}

#[test]
fn stability_serializes_kebab_case() {
    let json = serde_json::to_string(&ConfidenceLevel::MediumHigh).unwrap();
    assert_eq!(json, "\"medium-high\"");
}

proptest! {
    #[test]
    fn learned_reliability_always_in_bounds(v in -10.0f64..10.0) {
        let r = Reliability::new(v).value();
        prop_assert!((Reliability::MIN..=Reliability::MAX).contains(&r));
    }

    #[test]
    fn flag_for_review_iff_low(cv in 0.0f64..1.0) {
        let m = StabilityMetrics::from_cv(cv);
        prop_assert_eq!(m.flag_for_review, m.confidence_level == ConfidenceLevel::Low);
    }
}
