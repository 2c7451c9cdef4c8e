use crate::errors::AttendResult;
use crate::models::{OptimizationProposal, OptimizationSample, WeightConfiguration};

/// Proposes a new production weight configuration from graded samples.
pub trait IWeightOptimizer: Send + Sync {
    fn optimize(
        &self,
        samples: &[OptimizationSample],
        current: &WeightConfiguration,
    ) -> AttendResult<OptimizationProposal>;
}
