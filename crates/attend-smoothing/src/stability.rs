//! Dispersion statistics over a set of values.

use serde::{Deserialize, Serialize};

use attend_core::models::StabilityMetrics;
use attend_core::stats;

/// Summary of a value set's spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dispersion {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
    pub min: f64,
    pub max: f64,
}

/// Leaf analyzer classifying how tightly a day's readings agree.
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityAnalyzer;

impl StabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Mean, population σ, CV, and range. `None` for empty input.
    pub fn dispersion(&self, values: &[f64]) -> Option<Dispersion> {
        if values.is_empty() {
            return None;
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Dispersion {
            count: values.len(),
            mean: stats::mean(values),
            std_dev: stats::std_dev(values),
            coefficient_of_variation: stats::coefficient_of_variation(values),
            min,
            max,
        })
    }

    /// Classified stability, `None` for empty input.
    pub fn analyze(&self, values: &[f64]) -> Option<StabilityMetrics> {
        self.dispersion(values)
            .map(|d| StabilityMetrics::from_cv(d.coefficient_of_variation))
    }
}
