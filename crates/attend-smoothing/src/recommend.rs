use attend_core::config::SmoothingConfig;
use attend_core::models::{SmoothingMethod, StabilityMetrics};

/// Which estimator to report for a day with the given stability.
///
/// Tight days take the simple mean, volatile days the variance-filtered mean,
/// everything else (including unknown stability) the ensemble.
pub fn recommend(stability: Option<&StabilityMetrics>, config: &SmoothingConfig) -> SmoothingMethod {
    match stability.map(|s| s.coefficient_of_variation) {
        Some(cv) if cv < config.stable_cv => SmoothingMethod::SimpleAverage,
        Some(cv) if cv > config.volatile_cv => SmoothingMethod::VarianceFiltered,
        _ => SmoothingMethod::Ensemble,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        let c = SmoothingConfig::default();
        let at = |cv: f64| recommend(Some(&StabilityMetrics::from_cv(cv)), &c);
        assert_eq!(at(0.049), SmoothingMethod::SimpleAverage);
        assert_eq!(at(0.05), SmoothingMethod::Ensemble);
        assert_eq!(at(0.15), SmoothingMethod::Ensemble);
        assert_eq!(at(0.151), SmoothingMethod::VarianceFiltered);
        assert_eq!(recommend(None, &c), SmoothingMethod::Ensemble);
    }
}
