//! Intraday smoother scenarios: outlier filtering, stability-driven method
//! choice, interval centering, degenerate inputs, store-backed finalization.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use attend_core::config::SmoothingConfig;
use attend_core::models::*;
use attend_core::traits::IPredictionStore;
use attend_smoothing::{IntervalBasis, IntradaySmoother, TimeWeighting};
use attend_storage::StorageEngine;

fn smoother() -> IntradaySmoother {
    IntradaySmoother::new(SmoothingConfig::default()).unwrap()
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap()
}

/// Readings every 30 minutes from midnight.
fn series(values: &[f64]) -> Vec<PointPrediction> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| PointPrediction::new(v, start() + Duration::minutes(30 * i as i64)))
        .collect()
}

fn target() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
}

#[test]
fn variance_filter_excludes_single_outlier() {
    let mut values: Vec<f64> = (0..47).map(|i| 248.0 + (i % 5) as f64).collect();
    values.insert(20, 50.0);
    let results = smoother().compute_all(&series(&values), None);

    assert_eq!(results.variance_filter.discarded, 1);
    assert!(!results.variance_filter.used_median);
    assert!((results.variance_filtered - 250.0).abs() <= 3.0);
    // The plain mean is dragged down by the outlier.
    assert!(results.simple_average < 247.0);
}

#[test]
fn tight_day_reports_simple_average() {
    let fp = smoother().finalize(target(), &series(&[240.0, 260.0]), None);
    let stability = fp.stability.unwrap();
    assert!((stability.coefficient_of_variation - 0.04).abs() < 1e-9);
    assert_eq!(stability.confidence_level, ConfidenceLevel::High);
    assert_eq!(fp.smoothing_method, SmoothingMethod::SimpleAverage);
    assert_eq!(fp.value, 250.0);
}

#[test]
fn moderate_day_reports_ensemble() {
    let fp = smoother().finalize(target(), &series(&[220.0, 280.0]), None);
    let stability = fp.stability.unwrap();
    assert_eq!(stability.confidence_level, ConfidenceLevel::Medium);
    assert!(!stability.flag_for_review);
    assert_eq!(fp.smoothing_method, SmoothingMethod::Ensemble);
}

#[test]
fn volatile_day_is_flagged_and_filtered() {
    let fp = smoother().finalize(target(), &series(&[200.0, 300.0]), None);
    let stability = fp.stability.unwrap();
    assert_eq!(stability.confidence_level, ConfidenceLevel::Low);
    assert!(stability.flag_for_review);
    assert_eq!(fp.smoothing_method, SmoothingMethod::VarianceFiltered);
}

#[test]
fn interval_is_centered_on_ensemble_even_when_another_method_reports() {
    let s = smoother();
    let points: Vec<PointPrediction> = series(&[200.0, 300.0, 210.0, 290.0])
        .into_iter()
        .map(|p| {
            let v = p.value;
            p.with_intervals(Interval::centered(v, 10.0), Interval::centered(v, 20.0))
        })
        .collect();
    let results = s.compute_all(&points, None);
    let fp = s.finalize(target(), &points, None);

    assert_ne!(fp.smoothing_method, SmoothingMethod::Ensemble);
    let ci_center = (fp.ci80.lower + fp.ci80.upper) / 2.0;
    assert!((ci_center - results.ensemble).abs() <= 1.0);
    let cv = fp.stability.unwrap().coefficient_of_variation;
    assert!((fp.ci95.width() - (40.0 * (1.0 + cv)).round()).abs() <= 1.0);
}

#[test]
fn outputs_are_rounded_only_at_the_boundary() {
    let s = smoother();
    let points = series(&[250.4, 250.2, 250.3]);
    let results = s.compute_all(&points, None);
    assert!(results.simple_average.fract() != 0.0);
    let fp = s.finalize(target(), &points, None);
    assert_eq!(fp.value.fract(), 0.0);
    assert_eq!(fp.ci80.lower.fract(), 0.0);
    assert_eq!(fp.ci95.upper.fract(), 0.0);
}

#[test]
fn empty_input_is_zero_with_unknown_stability() {
    let fp = smoother().finalize(target(), &[], None);
    assert_eq!(fp.value, 0.0);
    assert_eq!(fp.source_count, 0);
    assert!(fp.stability.is_none());
    assert_eq!(fp.ci95, Interval::new(0.0, 0.0));
}

#[test]
fn single_input_degenerates_everywhere() {
    let s = smoother();
    let results = s.compute_all(&series(&[237.0]), None);
    for method in [
        SmoothingMethod::SimpleAverage,
        SmoothingMethod::Ewma,
        SmoothingMethod::ConfidenceWeighted,
        SmoothingMethod::TimeWindow,
        SmoothingMethod::TrimmedMean,
        SmoothingMethod::VarianceFiltered,
        SmoothingMethod::Kalman,
        SmoothingMethod::Ensemble,
    ] {
        assert!((results.value(method) - 237.0).abs() < 1e-9, "{method:?}");
    }
}

#[test]
fn non_finite_readings_are_skipped() {
    let results = smoother().compute_all(&series(&[250.0, f64::NAN, 252.0]), None);
    assert_eq!(results.source_count, 2);
    assert!((results.simple_average - 251.0).abs() < 1e-9);
}

#[test]
fn compute_all_is_deterministic() {
    let s = smoother();
    let points = series(&[251.0, 247.0, 260.0, 243.0, 255.0, 249.0]);
    assert_eq!(s.compute_all(&points, None), s.compute_all(&points, None));
}

#[test]
fn slot_accuracy_switches_time_weighting() {
    let s = smoother();
    let points = series(&[200.0, 300.0]);
    let mut acc = BTreeMap::new();
    acc.insert(TimeSlot::new(0), SlotAccuracy { mae: 50.0, count: 10 });
    acc.insert(TimeSlot::new(1), SlotAccuracy { mae: 1.0, count: 10 });

    let with = s.compute_all(&points, Some(&acc));
    assert_eq!(with.time_weighting, TimeWeighting::SlotAccuracy);
    // weights 0.02 and 1.0
    assert!((with.time_window - (200.0 * 0.02 + 300.0) / 1.02).abs() < 1e-9);

    let without = s.compute_all(&points, None);
    assert_eq!(without.time_weighting, TimeWeighting::Linear);
    assert!((without.time_window - (200.0 + 600.0) / 3.0).abs() < 1e-9);
}

#[test]
fn invalid_config_is_rejected() {
    let config = SmoothingConfig {
        ewma_alpha: 0.0,
        ..SmoothingConfig::default()
    };
    assert!(IntradaySmoother::new(config).is_err());
}

#[test]
fn finalize_from_store_reads_points() {
    let store = StorageEngine::open_in_memory().unwrap();
    for p in series(&[249.0, 251.0, 250.0]) {
        store.save_point_prediction(target(), &p).unwrap();
    }
    let fp = smoother().finalize_from_store(&store, target()).unwrap();
    assert_eq!(fp.source_count, 3);
    assert_eq!(fp.value, 250.0);
    assert_eq!(fp.smoothing_method, SmoothingMethod::SimpleAverage);

    let s = smoother();
    let points = store.get_point_predictions_for_date(target()).unwrap();
    let results = s.compute_all(&points, None);
    let fi = s.final_ci(&points, &results, fp.stability.as_ref());
    assert_eq!(fi.ci80_basis, IntervalBasis::Dispersion);
}
