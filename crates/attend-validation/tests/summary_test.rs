//! Recommendation thresholds over hand-built validation records.

use chrono::{Days, NaiveDate, Utc};

use attend_core::config::DualTrackConfig;
use attend_core::models::{PredictionInputs, Recommendation, StoredPredictionPair, ValidationRecord};
use attend_validation::summary::summarize;

const ACTUAL: f64 = 200.0;

fn record(day: u64, production_error: f64, experimental_error: f64) -> ValidationRecord {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(day))
        .unwrap();
    let pair = StoredPredictionPair {
        date,
        production: ACTUAL + production_error,
        experimental: ACTUAL - experimental_error,
        inputs: PredictionInputs::new(ACTUAL, 1.0, 1.0),
    };
    ValidationRecord::grade(&pair, ACTUAL, Utc::now())
}

fn summary_of(errors: &[(f64, f64)]) -> attend_core::models::ValidationSummary {
    let records: Vec<_> = errors
        .iter()
        .enumerate()
        .map(|(i, &(p, e))| record(i as u64, p, e))
        .collect();
    summarize(&records, 90, &DualTrackConfig::default())
}

#[test]
fn adopt_when_clearly_better_and_usually_winning() {
    let summary = summary_of(&[(10.0, 5.0); 10]);
    assert_eq!(summary.recommendation, Recommendation::AdoptExperimental);
}

#[test]
fn partial_when_modestly_better() {
    // 60% wins is not strictly above the adopt win rate.
    let mut errors = vec![(10.0, 9.0); 6];
    errors.extend(vec![(10.0, 10.5); 4]);
    let summary = summary_of(&errors);
    assert!((summary.relative_improvement - 0.04).abs() < 1e-9);
    assert!((summary.experimental_win_rate - 0.6).abs() < 1e-9);
    assert_eq!(summary.recommendation, Recommendation::PartialAdoption);
}

#[test]
fn reject_when_clearly_worse() {
    let summary = summary_of(&[(10.0, 12.0); 10]);
    assert!((summary.relative_improvement + 0.2).abs() < 1e-9);
    assert_eq!(summary.experimental_win_rate, 0.0);
    assert_eq!(summary.recommendation, Recommendation::RejectExperimental);
}

#[test]
fn inconclusive_when_tracks_tie() {
    let summary = summary_of(&[(10.0, 10.0); 10]);
    assert_eq!(summary.experimental_win_rate, 0.0);
    assert_eq!(summary.relative_improvement, 0.0);
    assert_eq!(summary.recommendation, Recommendation::Inconclusive);
}

#[test]
fn perfect_production_reports_zero_improvement() {
    let summary = summary_of(&[(0.0, 3.0); 5]);
    assert_eq!(summary.production.mae, 0.0);
    assert_eq!(summary.relative_improvement, 0.0);
    assert_eq!(summary.recommendation, Recommendation::Inconclusive);
}

#[test]
fn std_dev_reflects_error_spread() {
    let summary = summary_of(&[(4.0, 1.0), (8.0, 1.0)]);
    assert!((summary.production.mae - 6.0).abs() < 1e-9);
    assert!((summary.production.std_dev - 2.0).abs() < 1e-9);
    assert_eq!(summary.experimental.std_dev, 0.0);
}
