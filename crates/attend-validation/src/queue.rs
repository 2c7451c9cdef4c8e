//! Optimization request queue.
//!
//! A single consumer drains an unbounded channel. At most one request is in
//! flight: the flag is claimed on enqueue and released when the request
//! (and the guard it carries) is dropped, whether it completed, failed, or
//! was never delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Releases the in-flight flag on drop.
#[derive(Debug)]
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One optimization run to perform.
#[derive(Debug)]
pub struct OptimizationRequest {
    pub id: String,
    pub requested_at: DateTime<Utc>,
    /// Validations in the window when the trigger fired.
    pub sample_count: usize,
    pub window_days: u32,
    _guard: InFlightGuard,
}

/// Result of an enqueue attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Enqueued(String),
    InFlight,
    WorkerUnavailable,
}

/// Producer half, held by the validator.
#[derive(Debug, Clone)]
pub struct OptimizationQueue {
    tx: mpsc::UnboundedSender<OptimizationRequest>,
    in_flight: Arc<AtomicBool>,
}

/// Consumer half, handed to the worker.
#[derive(Debug)]
pub struct OptimizationReceiver {
    rx: mpsc::UnboundedReceiver<OptimizationRequest>,
}

pub fn optimization_channel() -> (OptimizationQueue, OptimizationReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        OptimizationQueue {
            tx,
            in_flight: Arc::new(AtomicBool::new(false)),
        },
        OptimizationReceiver { rx },
    )
}

impl OptimizationQueue {
    pub fn enqueue(&self, sample_count: usize, window_days: u32) -> EnqueueOutcome {
        if self.tx.is_closed() {
            return EnqueueOutcome::WorkerUnavailable;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return EnqueueOutcome::InFlight;
        }
        let request = OptimizationRequest {
            id: uuid::Uuid::new_v4().to_string(),
            requested_at: Utc::now(),
            sample_count,
            window_days,
            _guard: InFlightGuard(Arc::clone(&self.in_flight)),
        };
        let id = request.id.clone();
        match self.tx.send(request) {
            Ok(()) => EnqueueOutcome::Enqueued(id),
            // The returned request drops here and releases the flag.
            Err(_) => EnqueueOutcome::WorkerUnavailable,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl OptimizationReceiver {
    pub async fn recv(&mut self) -> Option<OptimizationRequest> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<OptimizationRequest> {
        self.rx.try_recv().ok()
    }
}
