mod optimizer;
mod storage;

pub use optimizer::IWeightOptimizer;
pub use storage::IPredictionStore;
