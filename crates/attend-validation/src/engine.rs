//! DualTrackValidator: production/experimental predictions, grading, and the
//! optimization trigger.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use attend_core::config::DualTrackConfig;
use attend_core::errors::{AttendError, AttendResult};
use attend_core::models::{PredictionInputs, ValidationRecord, ValidationSummary};
use attend_core::traits::IPredictionStore;
use attend_fusion::SanitizedInputs;
use attend_observability::tracing_setup::events;

use crate::queue::{EnqueueOutcome, OptimizationQueue};
use crate::state::ValidatorState;
use crate::summary;
use crate::trigger::{in_window, is_batch_boundary, TriggerDecision};
use crate::weights::{BoundaryClaim, DualTrackContext, DualTrackWeights};

/// Both track values issued for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualTrackPrediction {
    pub date: NaiveDate,
    pub production: f64,
    pub experimental: f64,
    pub inputs: PredictionInputs,
}

/// A graded date and what the trigger decided afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub record: ValidationRecord,
    pub trigger: TriggerDecision,
}

pub struct DualTrackValidator {
    store: Arc<dyn IPredictionStore>,
    config: DualTrackConfig,
    context: Arc<DualTrackContext>,
    queue: Option<OptimizationQueue>,
}

impl DualTrackValidator {
    /// Load production weights from the store, or the configured defaults
    /// when none were ever saved.
    pub fn new(store: Arc<dyn IPredictionStore>, config: DualTrackConfig) -> AttendResult<Self> {
        config.validate()?;
        let production = match store.load_current_weights()? {
            Some(weights) => weights,
            None => {
                events::fallback_used("dual_track", "default_weights", "no stored production weights");
                config.default_weights()?
            }
        };
        let context = Arc::new(DualTrackContext::new(production, &config));
        info!(
            w_base = production.w_base,
            w_weather = production.w_weather,
            w_ai = production.w_ai,
            "dual-track validator ready"
        );
        Ok(Self {
            store,
            config,
            context,
            queue: None,
        })
    }

    /// Attach the producer half of an optimization channel.
    pub fn with_queue(mut self, queue: OptimizationQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Re-read production weights from the store and re-derive experimental.
    ///
    /// Picks up weights committed elsewhere, e.g. by a worker in another
    /// process. An empty store keeps the weights already in memory.
    pub fn load_weights(&self) -> AttendResult<DualTrackWeights> {
        match self.store.load_current_weights()? {
            Some(stored) if stored != self.context.production() => {
                Ok(self.context.commit_production(stored))
            }
            Some(_) => Ok(self.context.snapshot()),
            None => {
                events::fallback_used("dual_track", "in_memory_weights", "no stored production weights");
                Ok(self.context.snapshot())
            }
        }
    }

    /// Shared with the [`OptimizationWorker`](crate::OptimizationWorker).
    pub fn context(&self) -> Arc<DualTrackContext> {
        Arc::clone(&self.context)
    }

    pub fn config(&self) -> &DualTrackConfig {
        &self.config
    }

    pub fn weights(&self) -> DualTrackWeights {
        self.context.snapshot()
    }

    pub fn state(&self) -> ValidatorState {
        self.context.state()
    }

    /// Compute and persist both track predictions from one weight snapshot.
    ///
    /// Factors are clamped to their ranges. Fails with `AlreadyGraded` once
    /// `date` has a validation record.
    pub fn predict(
        &self,
        date: NaiveDate,
        base_value: f64,
        weather_factor: f64,
        ai_factor: f64,
    ) -> AttendResult<DualTrackPrediction> {
        let sanitized = SanitizedInputs::new(base_value, ai_factor, weather_factor)?;
        let inputs = PredictionInputs::new(
            sanitized.base_value,
            sanitized.weather_factor,
            sanitized.ai_factor,
        );
        let weights = self.context.snapshot();
        let production = weights.production.apply(&inputs);
        let experimental = weights.experimental.apply(&inputs);

        self.store
            .save_prediction_pair(date, production, experimental, &inputs)?;

        Ok(DualTrackPrediction {
            date,
            production,
            experimental,
            inputs,
        })
    }

    /// Grade the stored pair for `date` against the realized count, persist the
    /// record, and re-check the optimization trigger.
    pub fn validate(&self, date: NaiveDate, actual_value: f64) -> AttendResult<ValidationOutcome> {
        let _span = attend_observability::validation_span!(date).entered();
        if !actual_value.is_finite() {
            return Err(AttendError::invalid_input(format!(
                "actual value must be finite, got {actual_value}"
            )));
        }
        let pair = self
            .store
            .get_predictions_for_date(date)?
            .ok_or(AttendError::MissingPrediction { date })?;
        let record = ValidationRecord::grade(&pair, actual_value, Utc::now());
        self.store.save_validation(&record)?;
        events::validation_recorded(
            &date.to_string(),
            record.production_error,
            record.experimental_error,
            record.better_track.as_str(),
        );

        let today = Utc::now().date_naive();
        let trigger = if in_window(date, today, self.config.window_days) {
            self.check_optimization_trigger()
        } else {
            debug!(%date, window_days = self.config.window_days, "graded date outside window, trigger not checked");
            TriggerDecision::OutsideWindow
        };
        Ok(ValidationOutcome { record, trigger })
    }

    /// Enqueue an optimization run when the in-window count has reached
    /// `min_samples` and sits on a `batch_size` boundary.
    ///
    /// Never fails: a store error reads as `CountUnavailable` and the
    /// validation that triggered the check stands.
    pub fn check_optimization_trigger(&self) -> TriggerDecision {
        let count = match self.store.count_validated_since(self.config.window_days) {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "could not count validations, skipping optimization check");
                return TriggerDecision::CountUnavailable;
            }
        };
        let in_flight = self.queue.as_ref().is_some_and(OptimizationQueue::is_in_flight);
        self.context.observe_count(count, in_flight);

        if count < self.config.min_samples {
            return TriggerDecision::NotReady { count };
        }
        if !is_batch_boundary(count, self.config.min_samples, self.config.batch_size) {
            return TriggerDecision::BetweenBatches { count };
        }
        let Some(queue) = &self.queue else {
            events::fallback_used("dual_track", "skip_optimization", "no optimization queue attached");
            return TriggerDecision::WorkerUnavailable { count };
        };
        // Enter `Optimizing` before the request is visible to the worker.
        let previous = match self.context.claim_boundary(count) {
            BoundaryClaim::Claimed { previous } => previous,
            BoundaryClaim::AlreadyFired => {
                debug!(count, "batch boundary already fired");
                return TriggerDecision::AlreadyFired { count };
            }
            BoundaryClaim::Busy => {
                info!(count, "optimization already in flight, skipping batch boundary");
                return TriggerDecision::InFlight { count };
            }
        };
        match queue.enqueue(count, self.config.window_days) {
            EnqueueOutcome::Enqueued(request_id) => {
                events::optimization_enqueued(&request_id, count, self.config.window_days);
                TriggerDecision::Enqueued { request_id, count }
            }
            EnqueueOutcome::InFlight => {
                self.context.release_boundary(previous);
                info!(count, "optimization already in flight, skipping batch boundary");
                TriggerDecision::InFlight { count }
            }
            EnqueueOutcome::WorkerUnavailable => {
                self.context.release_boundary(previous);
                events::fallback_used("dual_track", "skip_optimization", "optimization worker unavailable");
                TriggerDecision::WorkerUnavailable { count }
            }
        }
    }

    /// Error statistics and a recommendation over the configured window.
    pub fn get_validation_summary(&self) -> AttendResult<ValidationSummary> {
        let records = self.store.get_validations_since(self.config.window_days)?;
        Ok(summary::summarize(&records, self.config.window_days, &self.config))
    }
}
