use serde::{Deserialize, Serialize};

/// Lifecycle of the dual-track experiment.
///
/// `CollectingData → ReadyForOptimization → Optimizing → {WeightsUpdated | WeightsRejected} → CollectingData`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorState {
    #[default]
    CollectingData,
    ReadyForOptimization,
    Optimizing,
    WeightsUpdated,
    WeightsRejected,
}

impl ValidatorState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectingData => "collecting_data",
            Self::ReadyForOptimization => "ready_for_optimization",
            Self::Optimizing => "optimizing",
            Self::WeightsUpdated => "weights_updated",
            Self::WeightsRejected => "weights_rejected",
        }
    }

    /// Whether `self → next` is an edge of the lifecycle.
    ///
    /// `Optimizing → CollectingData` covers a failed or abandoned run.
    pub fn can_transition_to(self, next: ValidatorState) -> bool {
        use ValidatorState::*;
        matches!(
            (self, next),
            (CollectingData, ReadyForOptimization)
                | (ReadyForOptimization, CollectingData)
                | (ReadyForOptimization, Optimizing)
                | (Optimizing, WeightsUpdated)
                | (Optimizing, WeightsRejected)
                | (Optimizing, CollectingData)
                | (WeightsUpdated, CollectingData)
                | (WeightsRejected, CollectingData)
        )
    }
}
