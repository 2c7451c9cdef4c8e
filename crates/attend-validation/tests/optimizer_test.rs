//! GridSearchOptimizer over synthetic samples with a known best configuration.

use chrono::{Days, NaiveDate};

use attend_core::config::DualTrackConfig;
use attend_core::errors::{AttendError, OptimizationError};
use attend_core::models::{OptimizationSample, PredictionInputs, Track, WeightConfiguration};
use attend_core::traits::IWeightOptimizer;
use attend_validation::GridSearchOptimizer;

fn samples_from(truth: &WeightConfiguration, n: usize) -> Vec<OptimizationSample> {
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    (0..n)
        .map(|i| {
            let inputs = PredictionInputs::new(200.0 + i as f64, 1.0, 1.02 + 0.02 * (i % 10) as f64);
            OptimizationSample {
                date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                inputs,
                actual: truth.apply(&inputs),
            }
        })
        .collect()
}

fn optimizer() -> GridSearchOptimizer {
    GridSearchOptimizer::new(DualTrackConfig::default())
}

#[test]
fn finds_the_generating_weights() {
    let truth = WeightConfiguration::new(0.72, 0.10, 0.18, Track::Production).unwrap();
    let samples = samples_from(&truth, 30);
    let proposal = optimizer()
        .optimize(&samples, &WeightConfiguration::default())
        .unwrap();

    assert!((proposal.new_weights.w_ai - 0.18).abs() < 1e-9);
    assert!((proposal.new_weights.w_base - 0.72).abs() < 1e-9);
    assert_eq!(proposal.new_weights.w_weather, 0.10);
    assert_eq!(proposal.new_weights.track, Track::Production);
    assert!(proposal.new_mae < 1e-9);
    assert!(proposal.old_mae > 0.0);
    assert!(proposal.improvement_percentage > 99.0);
    assert!(proposal.statistically_significant);
    assert!(proposal.apply);
}

#[test]
fn optimum_beyond_the_cap_stops_at_the_cap() {
    let truth = WeightConfiguration::new(0.60, 0.10, 0.30, Track::Production).unwrap();
    let proposal = optimizer()
        .optimize(&samples_from(&truth, 30), &WeightConfiguration::default())
        .unwrap();
    assert!((proposal.new_weights.w_ai - 0.20).abs() < 1e-9);
    assert!(proposal.new_weights.w_base >= 0.70 - 1e-9);
}

#[test]
fn already_optimal_weights_are_kept_and_not_applied() {
    let current = WeightConfiguration::default();
    let proposal = optimizer()
        .optimize(&samples_from(&current, 30), &current)
        .unwrap();
    assert_eq!(proposal.new_weights, current);
    assert_eq!(proposal.improvement_percentage, 0.0);
    assert!(!proposal.statistically_significant);
    assert!(!proposal.apply);
}

#[test]
fn small_gain_below_threshold_is_not_applied() {
    let config = DualTrackConfig {
        min_improvement_pct: 200.0,
        ..DualTrackConfig::default()
    };
    let truth = WeightConfiguration::new(0.72, 0.10, 0.18, Track::Production).unwrap();
    let proposal = GridSearchOptimizer::new(config)
        .optimize(&samples_from(&truth, 30), &WeightConfiguration::default())
        .unwrap();
    assert!(proposal.statistically_significant);
    assert!(!proposal.apply);
}

#[test]
fn too_few_samples_is_an_error() {
    let samples = samples_from(&WeightConfiguration::default(), 10);
    match optimizer().optimize(&samples, &WeightConfiguration::default()) {
        Err(AttendError::OptimizationError(OptimizationError::InsufficientSamples {
            required,
            available,
        })) => {
            assert_eq!(required, 30);
            assert_eq!(available, 10);
        }
        other => panic!("expected InsufficientSamples, got {other:?}"),
    }
}

#[test]
fn infeasible_weather_weight_is_an_error() {
    let current = WeightConfiguration::new(0.60, 0.40, 0.0, Track::Production).unwrap();
    let result = optimizer().optimize(&samples_from(&current, 30), &current);
    assert!(matches!(
        result,
        Err(AttendError::OptimizationError(OptimizationError::NoFeasibleWeights { .. }))
    ));
}
