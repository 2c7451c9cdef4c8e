//! Inverse-variance (precision) weighted fusion.

use std::collections::BTreeMap;

use attend_core::constants::{Z_80, Z_95};
use attend_core::models::{FusionResult, FusionSource, FusionStrategy, Interval};

/// Fuse sources by precision. Sources must have positive, finite variance.
pub fn fuse(sources: Vec<FusionSource>) -> FusionResult {
    let total_precision: f64 = sources.iter().map(|s| 1.0 / s.variance).sum();
    let posterior_mean = sources
        .iter()
        .map(|s| s.mean_estimate / s.variance)
        .sum::<f64>()
        / total_precision;
    let posterior_variance = 1.0 / total_precision;
    let sigma = posterior_variance.sqrt();

    let mut weights = BTreeMap::new();
    let mut contributions = BTreeMap::new();
    for s in &sources {
        let w = (1.0 / s.variance) / total_precision;
        weights.insert(s.source, w);
        contributions.insert(s.source, w * s.mean_estimate);
    }

    FusionResult {
        strategy: FusionStrategy::Precision,
        posterior_mean,
        posterior_variance,
        ci80: Interval::centered(posterior_mean, Z_80 * sigma),
        ci95: Interval::centered(posterior_mean, Z_95 * sigma),
        sources,
        weights,
        contributions,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use attend_core::models::SourceKind;

    fn source(source: SourceKind, mean_estimate: f64, variance: f64) -> FusionSource {
        FusionSource {
            source,
            mean_estimate,
            variance,
        }
    }

    #[test]
    fn equal_variance_is_plain_mean() {
        let r = fuse(vec![
            source(SourceKind::Base, 100.0, 4.0),
            source(SourceKind::Weather, 110.0, 4.0),
            source(SourceKind::Ai, 120.0, 4.0),
        ]);
        assert!((r.posterior_mean - 110.0).abs() < 1e-9);
        assert!((r.posterior_variance - 4.0 / 3.0).abs() < 1e-9);
        assert!((r.weight(SourceKind::Ai) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn contributions_sum_to_posterior_mean() {
        let r = fuse(vec![
            source(SourceKind::Base, 250.0, 225.0),
            source(SourceKind::Weather, 255.0, 900.0),
            source(SourceKind::Ai, 275.0, 1600.0),
        ]);
        let sum: f64 = r.contributions.values().sum();
        assert!((sum - r.posterior_mean).abs() < 1e-9);
        assert!(r.ci80.width() < r.ci95.width());
    }
}
