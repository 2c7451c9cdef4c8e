//! Background consumer of optimization requests.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, Instrument};

use attend_core::config::DualTrackConfig;
use attend_core::errors::{AttendResult, OptimizationError};
use attend_core::models::{OptimizationEvent, OptimizationMetrics, OptimizationProposal, WeightConfiguration};
use attend_core::traits::{IPredictionStore, IWeightOptimizer};
use attend_observability::tracing_setup::events;

use crate::queue::{OptimizationReceiver, OptimizationRequest};
use crate::state::ValidatorState;
use crate::weights::DualTrackContext;

/// Runs the optimizer for each request and commits the outcome.
///
/// The event is persisted before the shared production weights change; a
/// failed run leaves both the store and the in-memory weights untouched.
pub struct OptimizationWorker {
    store: Arc<dyn IPredictionStore>,
    optimizer: Arc<dyn IWeightOptimizer>,
    context: Arc<DualTrackContext>,
    window_days: u32,
}

impl OptimizationWorker {
    pub fn new(
        store: Arc<dyn IPredictionStore>,
        optimizer: Arc<dyn IWeightOptimizer>,
        context: Arc<DualTrackContext>,
        config: &DualTrackConfig,
    ) -> Self {
        Self {
            store,
            optimizer,
            context,
            window_days: config.window_days,
        }
    }

    /// Spawn [`run`](Self::run) on the current tokio runtime.
    pub fn spawn(self, rx: OptimizationReceiver) -> JoinHandle<()> {
        tokio::spawn(self.run(rx))
    }

    /// Drain requests until every queue handle is dropped.
    pub async fn run(self, mut rx: OptimizationReceiver) {
        while let Some(request) = rx.recv().await {
            self.process(request).await;
        }
        info!("optimization worker stopped");
    }

    /// Handle one request. Returns the persisted event on success.
    pub async fn process(&self, request: OptimizationRequest) -> Option<OptimizationEvent> {
        let span = attend_observability::optimization_span!(request.id, request.sample_count);
        let event = self.execute(&request).instrument(span).await;
        // Release the in-flight flag only after the state is settled.
        drop(request);
        event
    }

    async fn execute(&self, request: &OptimizationRequest) -> Option<OptimizationEvent> {
        let current = self.context.production();
        let store = Arc::clone(&self.store);
        let optimizer = Arc::clone(&self.optimizer);
        let window_days = if request.window_days > 0 {
            request.window_days
        } else {
            self.window_days
        };

        let outcome = tokio::task::spawn_blocking(move || {
            run_optimization(store.as_ref(), optimizer.as_ref(), &current, window_days)
        })
        .await
        .unwrap_or_else(|e| {
            Err(OptimizationError::WorkerUnavailable {
                reason: e.to_string(),
            }
            .into())
        });

        match outcome {
            Ok((proposal, event)) => {
                if event.applied {
                    self.context.commit_production(proposal.new_weights);
                    self.context.transition(ValidatorState::WeightsUpdated);
                } else {
                    self.context.transition(ValidatorState::WeightsRejected);
                }
                events::optimization_completed(
                    &request.id,
                    event.improvement_percentage,
                    event.statistically_significant,
                    event.applied,
                );
                Some(event)
            }
            Err(e) => {
                events::optimization_failed(&request.id, &e.to_string());
                self.context.transition(ValidatorState::CollectingData);
                None
            }
        }
    }
}

fn run_optimization(
    store: &dyn IPredictionStore,
    optimizer: &dyn IWeightOptimizer,
    current: &WeightConfiguration,
    window_days: u32,
) -> AttendResult<(OptimizationProposal, OptimizationEvent)> {
    let samples = store.get_optimization_samples(window_days)?;
    let proposal = optimizer.optimize(&samples, current)?;
    let metrics = OptimizationMetrics {
        evaluation_window_days: window_days,
        sample_count: samples.len(),
        old_weights: *current,
        improvement_percentage: proposal.improvement_percentage,
        statistically_significant: proposal.statistically_significant,
        applied: proposal.apply,
    };
    let event = store.save_optimized_weights(&proposal.new_weights, &metrics)?;
    Ok((proposal, event))
}
