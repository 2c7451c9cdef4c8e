//! Additive strategy: base plus reliability-scaled factor adjustments.
//!
//! `final = base + α·(ai-1)·base + β·(weather-1)·base`, `α = r_ai / r_base`,
//! `β = r_weather / r_base`. Interval width grows with the total adjustment
//! relative to the base.

use std::collections::BTreeMap;

use attend_core::constants::{Z_80, Z_95};
use attend_core::models::{FusionResult, FusionStrategy, Interval, SourceKind, SourceReliability};

use crate::sources::{build_sources, SanitizedInputs};

pub fn fuse(inputs: &SanitizedInputs, reliability: &SourceReliability, base_std: f64) -> FusionResult {
    let base = inputs.base_value;
    let r_base = reliability.base.value();
    let alpha = reliability.ai.value() / r_base;
    let beta = reliability.weather.value() / r_base;

    let ai_adjustment = alpha * (inputs.ai_factor - 1.0) * base;
    let weather_adjustment = beta * (inputs.weather_factor - 1.0) * base;
    let posterior_mean = base + ai_adjustment + weather_adjustment;

    let relative_adjustment = if base.abs() > f64::EPSILON {
        (ai_adjustment.abs() + weather_adjustment.abs()) / base.abs()
    } else {
        0.0
    };
    let sigma = (base_std / r_base) * (1.0 + relative_adjustment);

    let total = 1.0 + alpha + beta;
    let weights = BTreeMap::from([
        (SourceKind::Base, 1.0 / total),
        (SourceKind::Ai, alpha / total),
        (SourceKind::Weather, beta / total),
    ]);
    // Contributions are the additive terms, so they sum to the posterior mean.
    let contributions = BTreeMap::from([
        (SourceKind::Base, base),
        (SourceKind::Ai, ai_adjustment),
        (SourceKind::Weather, weather_adjustment),
    ]);

    FusionResult {
        strategy: FusionStrategy::Additive,
        posterior_mean,
        posterior_variance: sigma * sigma,
        ci80: Interval::centered(posterior_mean, Z_80 * sigma),
        ci95: Interval::centered(posterior_mean, Z_95 * sigma),
        sources: build_sources(inputs, reliability, base_std),
        weights,
        contributions,
    }
}
