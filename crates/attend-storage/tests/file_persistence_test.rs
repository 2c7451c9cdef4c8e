//! File-backed persistence: data and weights survive a close + reopen cycle.

use chrono::{Days, Utc};

use attend_core::config::StorageConfig;
use attend_core::models::{PredictionInputs, Track, WeightConfiguration};
use attend_core::traits::IPredictionStore;
use attend_storage::StorageEngine;

#[test]
fn predictions_and_weights_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("attend.db");
    let date = Utc::now().date_naive().checked_sub_days(Days::new(1)).unwrap();
    let weights = WeightConfiguration::new(0.78, 0.10, 0.12, Track::Production).unwrap();

    // Session 1: write
    {
        let engine = StorageEngine::open(&db_path).unwrap();
        assert!(engine.is_wal().unwrap());
        let inputs = PredictionInputs::new(250.0, 1.0, 1.1);
        engine
            .save_prediction(date, Track::Production, 252.0, &inputs)
            .unwrap();
        engine
            .save_prediction(date, Track::Experimental, 253.0, &inputs)
            .unwrap();
        engine.set_current_weights(&weights).unwrap();
    }

    // Session 2: read back, migrations are not re-applied
    {
        let engine = StorageEngine::open(&db_path).unwrap();
        let pair = engine.get_predictions_for_date(date).unwrap().unwrap();
        assert_eq!(pair.production, 252.0);
        assert_eq!(pair.experimental, 253.0);
        assert_eq!(engine.load_current_weights().unwrap(), Some(weights));
        assert_eq!(engine.schema_version().unwrap(), 1);
    }
}

#[test]
fn wal_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: dir.path().join("nowal.db").to_string_lossy().into_owned(),
        wal_mode: false,
        ..StorageConfig::default()
    };
    let engine = StorageEngine::from_config(&config).unwrap();
    assert!(!engine.is_wal().unwrap());
}
