//! StorageEngine: owns the SQLite connection, runs migrations at startup,
//! implements `IPredictionStore`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use attend_core::config::StorageConfig;
use attend_core::errors::{AttendError, AttendResult};
use attend_core::models::{
    OptimizationEvent, OptimizationMetrics, OptimizationSample, PointPrediction, PredictionInputs,
    SlotAccuracy, StoredPredictionPair, TimeSlot, Track, ValidationRecord, WeightConfiguration,
};
use attend_core::traits::IPredictionStore;

use crate::migrations;
use crate::pool::WriteConnection;
use crate::queries::{
    point_prediction_ops, slot_accuracy_ops, track_prediction_ops, validation_ops, weight_ops,
};

/// The SQLite-backed prediction store.
pub struct StorageEngine {
    conn: WriteConnection,
    db_path: Option<PathBuf>,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, default pragmas.
    pub fn open(path: &Path) -> AttendResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open a file-backed engine with explicit storage settings.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> AttendResult<Self> {
        let engine = Self {
            conn: WriteConnection::open(path, config)?,
            db_path: Some(path.to_path_buf()),
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open the database named by `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> AttendResult<Self> {
        Self::open_with_config(Path::new(&config.db_path), config)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> AttendResult<Self> {
        let engine = Self {
            conn: WriteConnection::open_in_memory(&StorageConfig::default())?,
            db_path: None,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> AttendResult<()> {
        let version = self.conn.with_conn(migrations::run_migrations)?;
        info!(version, path = ?self.db_path, "storage engine ready");
        Ok(())
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Whether the connection is running in WAL mode.
    pub fn is_wal(&self) -> AttendResult<bool> {
        self.conn.with_conn(crate::pool::pragmas::verify_wal_mode)
    }

    pub fn schema_version(&self) -> AttendResult<u32> {
        self.conn.with_conn(migrations::current_version)
    }

    /// Seed or overwrite the current production weights outside an optimization run.
    pub fn set_current_weights(&self, weights: &WeightConfiguration) -> AttendResult<()> {
        self.conn
            .with_transaction(|conn| weight_ops::set_current(conn, weights))
    }

    /// Most recent optimization runs, newest first.
    pub fn recent_optimization_events(&self, limit: usize) -> AttendResult<Vec<OptimizationEvent>> {
        self.conn.with_conn(|conn| weight_ops::list_events(conn, limit))
    }
}

impl IPredictionStore for StorageEngine {
    fn get_point_predictions_for_date(&self, date: NaiveDate) -> AttendResult<Vec<PointPrediction>> {
        self.conn
            .with_conn(|conn| point_prediction_ops::get_for_date(conn, date))
    }

    fn save_point_prediction(&self, date: NaiveDate, prediction: &PointPrediction) -> AttendResult<()> {
        self.conn
            .with_conn(|conn| point_prediction_ops::insert_point_prediction(conn, date, prediction))
    }

    fn save_prediction(
        &self,
        date: NaiveDate,
        track: Track,
        value: f64,
        inputs: &PredictionInputs,
    ) -> AttendResult<()> {
        self.conn.with_transaction(|conn| {
            if validation_ops::is_graded(conn, date)? {
                return Err(AttendError::AlreadyGraded { date });
            }
            track_prediction_ops::upsert_prediction(conn, date, track, value, inputs)?;
            debug!(%date, track = track.as_str(), value, "track prediction stored");
            Ok(())
        })
    }

    fn save_prediction_pair(
        &self,
        date: NaiveDate,
        production: f64,
        experimental: f64,
        inputs: &PredictionInputs,
    ) -> AttendResult<()> {
        self.conn.with_transaction(|conn| {
            if validation_ops::is_graded(conn, date)? {
                return Err(AttendError::AlreadyGraded { date });
            }
            track_prediction_ops::upsert_prediction(conn, date, Track::Production, production, inputs)?;
            track_prediction_ops::upsert_prediction(conn, date, Track::Experimental, experimental, inputs)?;
            debug!(%date, production, experimental, "track prediction pair stored");
            Ok(())
        })
    }

    fn get_predictions_for_date(&self, date: NaiveDate) -> AttendResult<Option<StoredPredictionPair>> {
        self.conn
            .with_conn(|conn| track_prediction_ops::get_pair(conn, date))
    }

    fn save_validation(&self, record: &ValidationRecord) -> AttendResult<()> {
        self.conn.with_transaction(|conn| {
            if validation_ops::is_graded(conn, record.date)? {
                return Err(AttendError::AlreadyGraded { date: record.date });
            }
            validation_ops::insert_validation(conn, record)
        })
    }

    fn get_validations_since(&self, window_days: u32) -> AttendResult<Vec<ValidationRecord>> {
        self.conn
            .with_conn(|conn| validation_ops::get_since(conn, window_days))
    }

    fn count_validated_since(&self, window_days: u32) -> AttendResult<usize> {
        self.conn
            .with_conn(|conn| validation_ops::count_since(conn, window_days))
    }

    fn get_optimization_samples(&self, window_days: u32) -> AttendResult<Vec<OptimizationSample>> {
        self.conn
            .with_conn(|conn| validation_ops::optimization_samples(conn, window_days))
    }

    fn load_current_weights(&self) -> AttendResult<Option<WeightConfiguration>> {
        self.conn.with_conn(weight_ops::load_current)
    }

    fn save_optimized_weights(
        &self,
        weights: &WeightConfiguration,
        metrics: &OptimizationMetrics,
    ) -> AttendResult<OptimizationEvent> {
        let event = OptimizationEvent::new(*weights, metrics);
        self.conn.with_transaction(|conn| {
            weight_ops::insert_event(conn, &event)?;
            if metrics.applied {
                weight_ops::set_current(conn, weights)?;
            }
            Ok(())
        })?;
        info!(
            event_id = %event.id,
            applied = event.applied,
            improvement_percentage = event.improvement_percentage,
            "optimization event stored"
        );
        Ok(event)
    }

    fn get_historical_accuracy_by_time_slot(&self) -> AttendResult<BTreeMap<TimeSlot, SlotAccuracy>> {
        self.conn.with_conn(slot_accuracy_ops::accuracy_by_slot)
    }
}
