//! OptimizationWorker: commit on success, no-op on failure, and the spawned loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};

use attend_core::config::DualTrackConfig;
use attend_core::errors::{AttendResult, OptimizationError};
use attend_core::models::{OptimizationProposal, OptimizationSample, Track, WeightConfiguration};
use attend_core::traits::{IPredictionStore, IWeightOptimizer};
use attend_storage::StorageEngine;
use attend_validation::{
    optimization_channel, DualTrackValidator, GridSearchOptimizer, OptimizationQueue,
    OptimizationReceiver, OptimizationWorker, TriggerDecision, ValidatorState,
};

struct FailingOptimizer;

impl IWeightOptimizer for FailingOptimizer {
    fn optimize(
        &self,
        _samples: &[OptimizationSample],
        _current: &WeightConfiguration,
    ) -> AttendResult<OptimizationProposal> {
        Err(OptimizationError::NoFeasibleWeights {
            reason: "forced failure".into(),
        }
        .into())
    }
}

fn days_ago(n: u64) -> NaiveDate {
    Utc::now().date_naive().checked_sub_days(Days::new(n)).unwrap()
}

struct Harness {
    store: Arc<StorageEngine>,
    validator: DualTrackValidator,
    queue: OptimizationQueue,
    rx: Option<OptimizationReceiver>,
}

fn harness() -> Harness {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (queue, rx) = optimization_channel();
    let validator =
        DualTrackValidator::new(store.clone() as Arc<dyn IPredictionStore>, DualTrackConfig::default())
            .unwrap()
            .with_queue(queue.clone());
    Harness {
        store,
        validator,
        queue,
        rx: Some(rx),
    }
}

impl Harness {
    fn worker(&self, optimizer: Arc<dyn IWeightOptimizer>) -> OptimizationWorker {
        OptimizationWorker::new(
            self.store.clone() as Arc<dyn IPredictionStore>,
            optimizer,
            self.validator.context(),
            self.validator.config(),
        )
    }

    /// Thirty graded days whose actuals follow `w = {0.72, 0.10, 0.18}`.
    fn seed(&self) -> TriggerDecision {
        let truth = WeightConfiguration::new(0.72, 0.10, 0.18, Track::Production).unwrap();
        let mut last = TriggerDecision::CountUnavailable;
        for day in 1..=30u64 {
            let date = days_ago(day);
            let ai = 1.02 + 0.02 * (day % 10) as f64;
            let prediction = self.validator.predict(date, 200.0 + day as f64, 1.0, ai).unwrap();
            let actual = truth.apply(&prediction.inputs);
            last = self.validator.validate(date, actual).unwrap().trigger;
        }
        last
    }
}

#[tokio::test]
async fn successful_run_persists_then_commits() {
    let mut h = harness();
    assert!(h.seed().fired());
    let request = h.rx.as_mut().unwrap().try_recv().unwrap();

    let worker = h.worker(Arc::new(GridSearchOptimizer::new(DualTrackConfig::default())));
    let event = worker.process(request).await.unwrap();

    assert!(event.applied);
    assert!(event.statistically_significant);
    assert_eq!(event.sample_count, 30);
    assert_eq!(event.old_weights, WeightConfiguration::default());
    assert!((event.new_weights.w_ai - 0.18).abs() < 1e-9);

    let weights = h.validator.weights();
    assert_eq!(weights.production, event.new_weights);
    assert!((weights.experimental.w_ai - 0.20).abs() < 1e-9);
    assert_eq!(h.store.load_current_weights().unwrap(), Some(event.new_weights));
    assert_eq!(h.validator.state(), ValidatorState::WeightsUpdated);
    assert!(!h.queue.is_in_flight());
}

#[tokio::test]
async fn failed_run_changes_nothing() {
    let mut h = harness();
    assert!(h.seed().fired());
    let request = h.rx.as_mut().unwrap().try_recv().unwrap();

    let event = h.worker(Arc::new(FailingOptimizer)).process(request).await;

    assert!(event.is_none());
    assert_eq!(h.validator.weights().production, WeightConfiguration::default());
    assert!(h.store.load_current_weights().unwrap().is_none());
    assert!(h.store.recent_optimization_events(10).unwrap().is_empty());
    assert_eq!(h.validator.state(), ValidatorState::CollectingData);
    assert!(!h.queue.is_in_flight());
}

#[tokio::test]
async fn spawned_worker_drains_the_queue() {
    let mut h = harness();
    let rx = h.rx.take().unwrap();
    let handle = h
        .worker(Arc::new(GridSearchOptimizer::new(DualTrackConfig::default())))
        .spawn(rx);

    assert!(h.seed().fired());

    let mut committed = false;
    for _ in 0..200 {
        if h.validator.state() == ValidatorState::WeightsUpdated {
            committed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(committed, "worker did not commit within 2s");
    assert!((h.validator.weights().production.w_ai - 0.18).abs() < 1e-9);
    assert_eq!(h.store.recent_optimization_events(10).unwrap().len(), 1);

    drop(h);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("worker should stop once every queue handle is dropped")
        .unwrap();
}
