//! Shared production / experimental weights and the experiment state.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use attend_core::config::DualTrackConfig;
use attend_core::models::{Track, WeightConfiguration};

use crate::state::ValidatorState;

/// Both configurations as one consistent value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualTrackWeights {
    pub production: WeightConfiguration,
    pub experimental: WeightConfiguration,
}

impl DualTrackWeights {
    pub fn from_production(production: WeightConfiguration, config: &DualTrackConfig) -> Self {
        let production = production.with_track(Track::Production);
        Self {
            production,
            experimental: derive_experimental(&production, config),
        }
    }
}

/// Move up to `experimental_shift` of weight from base to ai, keeping
/// `w_base ≥ min_base_weight`, `w_ai ≤ max_ai_weight`, and `w_weather` fixed.
/// At the caps the experimental track equals production.
pub fn derive_experimental(production: &WeightConfiguration, config: &DualTrackConfig) -> WeightConfiguration {
    let shift = config
        .experimental_shift
        .min(production.w_base - config.min_base_weight)
        .min(config.max_ai_weight - production.w_ai)
        .max(0.0);
    let w_ai = production.w_ai + shift;
    let w_base = 1.0 - production.w_weather - w_ai;
    WeightConfiguration::new(w_base, production.w_weather, w_ai, Track::Experimental)
        .unwrap_or_else(|_| production.with_track(Track::Experimental))
}

/// Experiment state plus the last batch boundary that enqueued a run.
#[derive(Debug, Clone, Copy, Default)]
struct Lifecycle {
    state: ValidatorState,
    last_fired: Option<usize>,
}

/// Result of trying to start a run at a batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryClaim {
    /// The state is now `Optimizing`; `previous` restores the boundary on rollback.
    Claimed { previous: Option<usize> },
    /// A run already fired at this count.
    AlreadyFired,
    /// Not in `ReadyForOptimization`, usually because a run is in flight.
    Busy,
}

/// State shared between the validator and the optimization worker.
///
/// Readers copy the weights out under the read lock; the worker replaces
/// both configurations under the write lock, only after persistence succeeds.
#[derive(Debug)]
pub struct DualTrackContext {
    weights: RwLock<DualTrackWeights>,
    lifecycle: Mutex<Lifecycle>,
    config: DualTrackConfig,
}

impl DualTrackContext {
    pub fn new(production: WeightConfiguration, config: &DualTrackConfig) -> Self {
        Self {
            weights: RwLock::new(DualTrackWeights::from_production(production, config)),
            lifecycle: Mutex::new(Lifecycle::default()),
            config: config.clone(),
        }
    }

    /// Copy-on-read snapshot of both tracks.
    pub fn snapshot(&self) -> DualTrackWeights {
        *self.weights.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn production(&self) -> WeightConfiguration {
        self.snapshot().production
    }

    /// Replace production and re-derive experimental as one value.
    pub fn commit_production(&self, production: WeightConfiguration) -> DualTrackWeights {
        let next = DualTrackWeights::from_production(production, &self.config);
        let mut guard = self.weights.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        info!(
            w_base = next.production.w_base,
            w_weather = next.production.w_weather,
            w_ai = next.production.w_ai,
            "production weights committed"
        );
        next
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ValidatorState {
        self.lock().state
    }

    /// The count at which the last run was enqueued, if it still applies.
    pub fn last_fired_boundary(&self) -> Option<usize> {
        self.lock().last_fired
    }

    /// Move to `next` if it is a lifecycle edge. Returns whether it moved.
    pub fn transition(&self, next: ValidatorState) -> bool {
        transition_locked(&mut self.lock(), next)
    }

    /// Re-evaluate the gate after a count of in-window validations.
    ///
    /// A finished run returns to `CollectingData`; an `Optimizing` state whose
    /// request is no longer in flight was abandoned and also returns. A count
    /// that fell below the last fired boundary re-arms it.
    pub fn observe_count(&self, count: usize, in_flight: bool) {
        let mut lifecycle = self.lock();
        if lifecycle.last_fired.is_some_and(|fired| count < fired) {
            lifecycle.last_fired = None;
        }
        match lifecycle.state {
            ValidatorState::Optimizing if in_flight => return,
            ValidatorState::Optimizing
            | ValidatorState::WeightsUpdated
            | ValidatorState::WeightsRejected => {
                transition_locked(&mut lifecycle, ValidatorState::CollectingData);
            }
            _ => {}
        }
        let ready = count >= self.config.min_samples;
        match (lifecycle.state, ready) {
            (ValidatorState::CollectingData, true) => {
                transition_locked(&mut lifecycle, ValidatorState::ReadyForOptimization);
            }
            (ValidatorState::ReadyForOptimization, false) => {
                transition_locked(&mut lifecycle, ValidatorState::CollectingData);
            }
            _ => {}
        }
    }

    /// Enter `Optimizing` for the boundary at `count`, before the request is sent.
    pub fn claim_boundary(&self, count: usize) -> BoundaryClaim {
        let mut lifecycle = self.lock();
        if lifecycle.last_fired == Some(count) {
            return BoundaryClaim::AlreadyFired;
        }
        if lifecycle.state != ValidatorState::ReadyForOptimization {
            return BoundaryClaim::Busy;
        }
        let previous = lifecycle.last_fired;
        transition_locked(&mut lifecycle, ValidatorState::Optimizing);
        lifecycle.last_fired = Some(count);
        BoundaryClaim::Claimed { previous }
    }

    /// Undo a claim whose request never reached the queue.
    pub fn release_boundary(&self, previous: Option<usize>) {
        let mut lifecycle = self.lock();
        if lifecycle.state == ValidatorState::Optimizing {
            info!(to = ValidatorState::ReadyForOptimization.as_str(), "optimization claim released");
            lifecycle.state = ValidatorState::ReadyForOptimization;
        }
        lifecycle.last_fired = previous;
    }
}

fn transition_locked(lifecycle: &mut Lifecycle, next: ValidatorState) -> bool {
    let state = lifecycle.state;
    if state == next {
        return true;
    }
    if !state.can_transition_to(next) {
        warn!(from = state.as_str(), to = next.as_str(), "ignored invalid state transition");
        return false;
    }
    info!(from = state.as_str(), to = next.as_str(), "validator state changed");
    lifecycle.state = next;
    true
}
