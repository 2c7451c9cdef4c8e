/// Weight optimization errors.
#[derive(Debug, thiserror::Error)]
pub enum OptimizationError {
    #[error("insufficient samples: need {required}, have {available}")]
    InsufficientSamples { required: usize, available: usize },

    #[error("optimization worker unavailable: {reason}")]
    WorkerUnavailable { reason: String },

    #[error("no feasible weight configuration: {reason}")]
    NoFeasibleWeights { reason: String },
}
