use chrono::NaiveDate;
use tracing::{debug, info};

use attend_core::config::FusionConfig;
use attend_core::errors::AttendResult;
use attend_core::models::{FusionResult, FusionStrategy, SourceKind, SourcePredictions, SourceReliability};
use attend_observability::tracing_setup::events;

use crate::reliability::{self, ReliabilityHistory, ReliabilityObservation};
use crate::sources::{build_sources, SanitizedInputs};
use crate::{additive, precision};

/// Combines the base forecast with its weather and AI-event adjusted variants.
///
/// Owns its reliability state; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct BayesianFusionEngine {
    config: FusionConfig,
    reliability: SourceReliability,
    history: ReliabilityHistory,
}

impl BayesianFusionEngine {
    /// Validates the config and seeds reliability from `initial_reliability`.
    pub fn new(config: FusionConfig) -> AttendResult<Self> {
        config.validate()?;
        Ok(Self {
            reliability: config.initial_reliability,
            history: ReliabilityHistory::new(config.history_capacity),
            config,
        })
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn reliability(&self) -> SourceReliability {
        self.reliability
    }

    /// Replace the current reliability, e.g. with explicitly seeded priors.
    pub fn set_reliability(&mut self, reliability: SourceReliability) {
        self.reliability = reliability;
    }

    pub fn history(&self) -> &ReliabilityHistory {
        &self.history
    }

    /// Precision-weighted fusion. Weights sum to 1.
    pub fn predict(&self, base_value: f64, ai_factor: f64, weather_factor: f64) -> AttendResult<FusionResult> {
        let inputs = SanitizedInputs::new(base_value, ai_factor, weather_factor)?;
        let sources = build_sources(&inputs, &self.reliability, self.config.base_std);
        let result = precision::fuse(sources);
        debug!(
            base_value,
            posterior_mean = result.posterior_mean,
            posterior_std = result.posterior_std(),
            weight_base = result.weight(SourceKind::Base),
            "precision fusion"
        );
        Ok(result)
    }

    /// Additive fusion with reliability-ratio scaled adjustments.
    pub fn predict_additive(&self, base_value: f64, ai_factor: f64, weather_factor: f64) -> AttendResult<FusionResult> {
        let inputs = SanitizedInputs::new(base_value, ai_factor, weather_factor)?;
        let result = additive::fuse(&inputs, &self.reliability, self.config.base_std);
        debug!(
            base_value,
            posterior_mean = result.posterior_mean,
            posterior_std = result.posterior_std(),
            "additive fusion"
        );
        Ok(result)
    }

    /// Fuse with an explicit strategy.
    pub fn fuse(
        &self,
        strategy: FusionStrategy,
        base_value: f64,
        ai_factor: f64,
        weather_factor: f64,
    ) -> AttendResult<FusionResult> {
        let span = attend_observability::fusion_span!(strategy);
        let _guard = span.enter();
        match strategy {
            FusionStrategy::Precision => self.predict(base_value, ai_factor, weather_factor),
            FusionStrategy::Additive => self.predict_additive(base_value, ai_factor, weather_factor),
        }
    }

    /// Fuse with the configured strategy.
    pub fn fuse_configured(&self, base_value: f64, ai_factor: f64, weather_factor: f64) -> AttendResult<FusionResult> {
        self.fuse(self.config.strategy, base_value, ai_factor, weather_factor)
    }

    /// Grade each present source against `actual` and step its reliability.
    /// The observation is appended to the bounded history.
    pub fn update_reliability(
        &mut self,
        date: NaiveDate,
        actual: f64,
        predictions: &SourcePredictions,
    ) -> SourceReliability {
        if actual.is_finite() {
            for source in SourceKind::ALL {
                let Some(predicted) = predictions.get(source).filter(|p| p.is_finite()) else {
                    continue;
                };
                let error = (predicted - actual).abs();
                let previous = self.reliability.get(source);
                let next = reliability::updated_reliability(
                    previous,
                    error,
                    self.config.base_std,
                    self.config.learning_rate,
                );
                self.reliability.set(source, next);
                events::reliability_updated(source.as_str(), previous.value(), next.value(), error);
            }
        }
        self.history.push(ReliabilityObservation {
            date,
            actual,
            predictions: *predictions,
            reliability: self.reliability,
        });
        self.reliability
    }

    /// Batch re-estimation. Every source with at least `min_history_observations`
    /// graded predictions gets `clamp(base_std / (MAE + base_std))`.
    /// Returns the sources that were re-estimated.
    pub fn learn_from_history(&mut self, records: &[ReliabilityObservation]) -> Vec<SourceKind> {
        let mut updated = Vec::new();
        for source in SourceKind::ALL {
            let Some((mae, count)) = reliability::source_mae(records, source) else {
                continue;
            };
            if count < self.config.min_history_observations {
                continue;
            }
            let next = reliability::reliability_from_mae(mae, self.config.base_std);
            info!(source = source.as_str(), mae, count, reliability = next.value(), "reliability re-estimated");
            self.reliability.set(source, next);
            updated.push(source);
        }
        updated
    }

    /// [`learn_from_history`](Self::learn_from_history) over the engine's own history.
    pub fn learn_from_own_history(&mut self) -> Vec<SourceKind> {
        let records = self.history.to_vec();
        self.learn_from_history(&records)
    }
}
