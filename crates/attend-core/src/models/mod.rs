mod finalized_prediction;
mod fusion;
mod optimization;
mod point_prediction;
mod reliability;
mod slot_accuracy;
mod stability;
mod summary;
mod validation;
mod weights;

pub use finalized_prediction::{FinalizedPrediction, SmoothingMethod};
pub use fusion::{FusionResult, FusionSource, FusionStrategy, SourceKind, SourcePredictions};
pub use optimization::{
    OptimizationEvent, OptimizationMetrics, OptimizationProposal, OptimizationSample,
};
pub use point_prediction::{Interval, PointPrediction};
pub use reliability::{Reliability, SourceReliability};
pub use slot_accuracy::{SlotAccuracy, TimeSlot};
pub use stability::{ConfidenceLevel, StabilityMetrics};
pub use summary::{Recommendation, TrackStats, ValidationSummary};
pub use validation::{PredictionInputs, StoredPredictionPair, ValidationRecord};
pub use weights::{Track, WeightConfiguration};
