use attend_core::config::*;
use attend_core::errors::AttendError;
use attend_core::models::FusionStrategy;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = AttendConfig::from_toml("").unwrap();

    // Smoothing defaults
    assert_eq!(config.smoothing.ewma_alpha, 0.65);
    assert_eq!(config.smoothing.trim_percent, 0.10);
    assert_eq!(config.smoothing.variance_threshold, 1.5);
    assert_eq!(config.smoothing.kalman_process_noise, 1.0);
    assert_eq!(config.smoothing.kalman_measurement_noise, 10.0);
    assert_eq!(config.smoothing.ensemble_weights.ewma, 0.30);
    assert_eq!(config.smoothing.ensemble_weights.kalman, 0.25);

    // Fusion defaults
    assert_eq!(config.fusion.base_std, 15.0);
    assert_eq!(config.fusion.learning_rate, 0.1);
    assert_eq!(config.fusion.history_capacity, 90);
    assert_eq!(config.fusion.strategy, FusionStrategy::Precision);

    // Dual-track defaults
    assert_eq!(config.dual_track.window_days, 90);
    assert_eq!(config.dual_track.min_samples, 30);
    assert_eq!(config.dual_track.batch_size, 10);
    assert_eq!(config.dual_track.min_base_weight, 0.70);
    assert_eq!(config.dual_track.max_ai_weight, 0.20);

    // Storage / observability defaults
    assert_eq!(config.storage.db_path, "attend.db");
    assert!(config.storage.wal_mode);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[smoothing]
ewma_alpha = 0.5

[fusion]
strategy = "additive"

[fusion.initial_reliability]
ai = 0.4

[dual_track]
batch_size = 5
"#;
    let config = AttendConfig::from_toml(toml).unwrap();
    assert_eq!(config.smoothing.ewma_alpha, 0.5);
    assert_eq!(config.smoothing.trim_percent, 0.10); // default
    assert_eq!(config.fusion.strategy, FusionStrategy::Additive);
    assert_eq!(config.fusion.initial_reliability.ai.value(), 0.4);
    assert_eq!(config.fusion.initial_reliability.base.value(), 0.8); // default
    assert_eq!(config.dual_track.batch_size, 5);
    assert_eq!(config.dual_track.min_samples, 30); // default
}

#[test]
fn config_rejects_out_of_range_alpha() {
    let err = AttendConfig::from_toml("[smoothing]\newma_alpha = 1.5\n").unwrap_err();
    match err {
        AttendError::InvalidConfig { field, .. } => assert_eq!(field, "smoothing.ewma_alpha"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_rejects_ensemble_weights_not_summing_to_one() {
    let toml = r#"
[smoothing.ensemble_weights]
ewma = 0.5
"#;
    let err = AttendConfig::from_toml(toml).unwrap_err();
    assert!(matches!(err, AttendError::InvalidConfig { .. }));
}

#[test]
fn config_rejects_zero_batch_size() {
    let err = AttendConfig::from_toml("[dual_track]\nbatch_size = 0\n").unwrap_err();
    assert!(err.to_string().contains("batch_size"));
}

#[test]
fn config_rejects_defaults_outside_caps() {
    let toml = r#"
[dual_track]
default_w_base = 0.6
default_w_weather = 0.1
default_w_ai = 0.3
"#;
    assert!(AttendConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_malformed_toml() {
    let err = AttendConfig::from_toml("[smoothing\newma_alpha = ").unwrap_err();
    assert!(matches!(err, AttendError::ConfigParseError(_)));
}

#[test]
fn config_serde_roundtrip() {
    let config = AttendConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = AttendConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.smoothing.ewma_alpha, config.smoothing.ewma_alpha);
    assert_eq!(roundtripped.dual_track.window_days, config.dual_track.window_days);
}
