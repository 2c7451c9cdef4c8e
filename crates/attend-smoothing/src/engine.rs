use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use attend_core::config::SmoothingConfig;
use attend_core::errors::AttendResult;
use attend_core::models::{
    FinalizedPrediction, PointPrediction, SlotAccuracy, SmoothingMethod, StabilityMetrics, TimeSlot,
};
use attend_core::traits::IPredictionStore;
use attend_observability::tracing_setup::events;

use crate::interval::{self, FinalInterval};
use crate::methods::{self, TimeWeighting, VarianceFilterOutcome};
use crate::recommend;
use crate::stability::StabilityAnalyzer;

/// Every estimator's output for one day, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingResults {
    pub simple_average: f64,
    pub ewma: f64,
    pub confidence_weighted: f64,
    pub time_window: f64,
    pub trimmed_mean: f64,
    pub variance_filtered: f64,
    pub kalman: f64,
    pub ensemble: f64,
    /// Number of readings that went into the estimates.
    pub source_count: usize,
    /// No reading carried a confidence; `confidence_weighted` is the simple mean.
    pub confidence_fallback: bool,
    pub time_weighting: TimeWeighting,
    pub variance_filter: VarianceFilterOutcome,
}

impl SmoothingResults {
    fn empty() -> Self {
        Self {
            simple_average: 0.0,
            ewma: 0.0,
            confidence_weighted: 0.0,
            time_window: 0.0,
            trimmed_mean: 0.0,
            variance_filtered: 0.0,
            kalman: 0.0,
            ensemble: 0.0,
            source_count: 0,
            confidence_fallback: true,
            time_weighting: TimeWeighting::Linear,
            variance_filter: methods::variance_filtered(&[], 1.0, 1.0),
        }
    }

    /// The estimate produced by `method`.
    pub fn value(&self, method: SmoothingMethod) -> f64 {
        match method {
            SmoothingMethod::SimpleAverage => self.simple_average,
            SmoothingMethod::Ewma => self.ewma,
            SmoothingMethod::ConfidenceWeighted => self.confidence_weighted,
            SmoothingMethod::TimeWindow => self.time_window,
            SmoothingMethod::TrimmedMean => self.trimmed_mean,
            SmoothingMethod::VarianceFiltered => self.variance_filtered,
            SmoothingMethod::Kalman => self.kalman,
            SmoothingMethod::Ensemble => self.ensemble,
        }
    }
}

/// Reduces a day's repeated point predictions to one finalized value.
///
/// Plain value: construct one per session, no shared state.
#[derive(Debug, Clone)]
pub struct IntradaySmoother {
    config: SmoothingConfig,
    analyzer: StabilityAnalyzer,
}

impl IntradaySmoother {
    /// Validates the config.
    pub fn new(config: SmoothingConfig) -> AttendResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            analyzer: StabilityAnalyzer::new(),
        })
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Run every estimator over `predictions` (in issue order).
    ///
    /// Non-finite readings are skipped. Empty input yields all zeros.
    pub fn compute_all(
        &self,
        predictions: &[PointPrediction],
        slot_accuracy: Option<&BTreeMap<TimeSlot, SlotAccuracy>>,
    ) -> SmoothingResults {
        let points = finite_points(predictions);
        if points.is_empty() {
            return SmoothingResults::empty();
        }
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let c = &self.config;

        let ewma = methods::ewma(&values, c.ewma_alpha);
        let (confidence_weighted, confidence_fallback) = methods::confidence_weighted(&points);
        let (time_window, time_weighting) = methods::time_window(&points, slot_accuracy);
        let trimmed_mean = methods::trimmed_mean(&values, c.trim_percent);
        let variance_filter = methods::variance_filtered(&values, c.variance_threshold, c.ewma_alpha);
        let kalman = methods::kalman_smooth(
            &values,
            c.kalman_initial_covariance,
            c.kalman_process_noise,
            c.kalman_measurement_noise,
        );
        let ensemble = methods::ensemble(&c.ensemble_weights, ewma, time_window, trimmed_mean, kalman);

        if time_weighting == TimeWeighting::Linear {
            events::fallback_used("smoother.time_window", "linear_recency_weights", "no slot accuracy history");
        }
        if variance_filter.used_median {
            debug!(
                kept = variance_filter.kept,
                discarded = variance_filter.discarded,
                "variance filter kept fewer than half, using median"
            );
        }

        SmoothingResults {
            simple_average: methods::simple_average(&values),
            ewma,
            confidence_weighted,
            time_window,
            trimmed_mean,
            variance_filtered: variance_filter.value,
            kalman,
            ensemble,
            source_count: points.len(),
            confidence_fallback,
            time_weighting,
            variance_filter,
        }
    }

    pub fn compute_stability(&self, values: &[f64]) -> Option<StabilityMetrics> {
        self.analyzer.analyze(values)
    }

    pub fn recommend(&self, stability: Option<&StabilityMetrics>) -> SmoothingMethod {
        recommend::recommend(stability, &self.config)
    }

    /// Intervals centered on the ensemble estimate, whichever method is reported.
    pub fn final_ci(
        &self,
        predictions: &[PointPrediction],
        results: &SmoothingResults,
        stability: Option<&StabilityMetrics>,
    ) -> FinalInterval {
        let points = finite_points(predictions);
        let fi = interval::final_interval(&points, results.ensemble, stability);
        if !points.is_empty() && fi.ci95_basis == interval::IntervalBasis::Dispersion {
            events::fallback_used("smoother.final_ci", "value_dispersion_width", "no input intervals");
        }
        fi
    }

    /// Smooth, classify, pick the reported method, and round at the boundary.
    pub fn finalize(
        &self,
        target_date: NaiveDate,
        predictions: &[PointPrediction],
        slot_accuracy: Option<&BTreeMap<TimeSlot, SlotAccuracy>>,
    ) -> FinalizedPrediction {
        let span = attend_observability::smoothing_span!(target_date, predictions.len());
        let _guard = span.enter();

        let results = self.compute_all(predictions, slot_accuracy);
        let values: Vec<f64> = finite_points(predictions).iter().map(|p| p.value).collect();
        let stability = self.compute_stability(&values);
        let method = self.recommend(stability.as_ref());
        let fi = self.final_ci(predictions, &results, stability.as_ref());

        let finalized = FinalizedPrediction {
            target_date,
            value: results.value(method).round(),
            ci80: fi.ci80.rounded(),
            ci95: fi.ci95.rounded(),
            smoothing_method: method,
            source_count: results.source_count,
            stability,
        };
        events::prediction_finalized(
            &target_date.to_string(),
            finalized.value,
            method.as_str(),
            finalized.source_count,
        );
        finalized
    }

    /// [`finalize`](Self::finalize) over the store's readings for `target_date`.
    ///
    /// A failed point-prediction read is propagated. A failed slot-accuracy read
    /// falls back to linear recency weights.
    pub fn finalize_from_store(
        &self,
        store: &dyn IPredictionStore,
        target_date: NaiveDate,
    ) -> AttendResult<FinalizedPrediction> {
        let predictions = store.get_point_predictions_for_date(target_date)?;
        let slot_accuracy = match store.get_historical_accuracy_by_time_slot() {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "slot accuracy unavailable");
                events::fallback_used("smoother.slot_accuracy", "empty_accuracy_map", &e.to_string());
                BTreeMap::new()
            }
        };
        Ok(self.finalize(target_date, &predictions, Some(&slot_accuracy)))
    }
}

fn finite_points(predictions: &[PointPrediction]) -> Vec<PointPrediction> {
    let points: Vec<PointPrediction> = predictions
        .iter()
        .filter(|p| p.value.is_finite())
        .cloned()
        .collect();
    if points.len() < predictions.len() {
        warn!(
            skipped = predictions.len() - points.len(),
            "skipping non-finite point predictions"
        );
    }
    points
}
