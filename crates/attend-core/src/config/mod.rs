pub mod defaults;
mod dual_track_config;
mod fusion_config;
mod observability_config;
mod smoothing_config;
mod storage_config;

pub use dual_track_config::DualTrackConfig;
pub use fusion_config::FusionConfig;
pub use observability_config::ObservabilityConfig;
pub use smoothing_config::{EnsembleWeights, SmoothingConfig};
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::AttendResult;

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendConfig {
    pub smoothing: SmoothingConfig,
    pub fusion: FusionConfig,
    pub dual_track: DualTrackConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl AttendConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults;
    /// out-of-range values are rejected.
    pub fn from_toml(s: &str) -> AttendResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AttendResult<()> {
        self.smoothing.validate()?;
        self.fusion.validate()?;
        self.dual_track.validate()?;
        Ok(())
    }
}
