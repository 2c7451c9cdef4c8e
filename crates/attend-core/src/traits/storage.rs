use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::AttendResult;
use crate::models::{
    OptimizationEvent, OptimizationMetrics, OptimizationSample, PointPrediction, PredictionInputs,
    SlotAccuracy, StoredPredictionPair, TimeSlot, Track, ValidationRecord, WeightConfiguration,
};

/// Persistence contract required by the smoother and the dual-track validator.
///
/// Window arguments count whole days back from today (UTC), inclusive.
pub trait IPredictionStore: Send + Sync {
    // --- Intraday readings ---
    /// Point predictions for a target date, ordered by timestamp.
    fn get_point_predictions_for_date(&self, date: NaiveDate) -> AttendResult<Vec<PointPrediction>>;
    fn save_point_prediction(&self, date: NaiveDate, prediction: &PointPrediction) -> AttendResult<()>;

    // --- Dual-track predictions ---
    /// Idempotent upsert keyed by `(date, track)`. Fails with `AlreadyGraded`
    /// once a validation record exists for `date`.
    fn save_prediction(
        &self,
        date: NaiveDate,
        track: Track,
        value: f64,
        inputs: &PredictionInputs,
    ) -> AttendResult<()>;
    /// Both tracks for one date in a single transaction: either both rows are
    /// written or neither is. Same `AlreadyGraded` rule as `save_prediction`.
    fn save_prediction_pair(
        &self,
        date: NaiveDate,
        production: f64,
        experimental: f64,
        inputs: &PredictionInputs,
    ) -> AttendResult<()>;
    /// Both tracks for a date, or `None` unless both are stored.
    fn get_predictions_for_date(&self, date: NaiveDate) -> AttendResult<Option<StoredPredictionPair>>;

    // --- Validation ---
    /// Fails with `AlreadyGraded` if the date already has a record.
    fn save_validation(&self, record: &ValidationRecord) -> AttendResult<()>;
    fn get_validations_since(&self, window_days: u32) -> AttendResult<Vec<ValidationRecord>>;
    fn count_validated_since(&self, window_days: u32) -> AttendResult<usize>;
    fn get_optimization_samples(&self, window_days: u32) -> AttendResult<Vec<OptimizationSample>>;

    // --- Weights ---
    /// The current production configuration, `None` if never stored.
    fn load_current_weights(&self) -> AttendResult<Option<WeightConfiguration>>;
    /// Record an optimization run. When `metrics.applied` the weights become the
    /// current production configuration in the same transaction.
    fn save_optimized_weights(
        &self,
        weights: &WeightConfiguration,
        metrics: &OptimizationMetrics,
    ) -> AttendResult<OptimizationEvent>;

    // --- Accuracy ---
    fn get_historical_accuracy_by_time_slot(&self) -> AttendResult<BTreeMap<TimeSlot, SlotAccuracy>>;
}

/// Blanket impl: `Arc<T>` implements `IPredictionStore` by delegating to the inner `T`.
impl<T: IPredictionStore> IPredictionStore for Arc<T> {
    fn get_point_predictions_for_date(&self, date: NaiveDate) -> AttendResult<Vec<PointPrediction>> { (**self).get_point_predictions_for_date(date) }
    fn save_point_prediction(&self, date: NaiveDate, prediction: &PointPrediction) -> AttendResult<()> { (**self).save_point_prediction(date, prediction) }
    fn save_prediction(&self, date: NaiveDate, track: Track, value: f64, inputs: &PredictionInputs) -> AttendResult<()> { (**self).save_prediction(date, track, value, inputs) }
    fn save_prediction_pair(&self, date: NaiveDate, production: f64, experimental: f64, inputs: &PredictionInputs) -> AttendResult<()> { (**self).save_prediction_pair(date, production, experimental, inputs) }
    fn get_predictions_for_date(&self, date: NaiveDate) -> AttendResult<Option<StoredPredictionPair>> { (**self).get_predictions_for_date(date) }
    fn save_validation(&self, record: &ValidationRecord) -> AttendResult<()> { (**self).save_validation(record) }
    fn get_validations_since(&self, window_days: u32) -> AttendResult<Vec<ValidationRecord>> { (**self).get_validations_since(window_days) }
    fn count_validated_since(&self, window_days: u32) -> AttendResult<usize> { (**self).count_validated_since(window_days) }
    fn get_optimization_samples(&self, window_days: u32) -> AttendResult<Vec<OptimizationSample>> { (**self).get_optimization_samples(window_days) }
    fn load_current_weights(&self) -> AttendResult<Option<WeightConfiguration>> { (**self).load_current_weights() }
    fn save_optimized_weights(&self, weights: &WeightConfiguration, metrics: &OptimizationMetrics) -> AttendResult<OptimizationEvent> { (**self).save_optimized_weights(weights, metrics) }
    fn get_historical_accuracy_by_time_slot(&self) -> AttendResult<BTreeMap<TimeSlot, SlotAccuracy>> { (**self).get_historical_accuracy_by_time_slot() }
}
