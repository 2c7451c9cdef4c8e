use attend_core::config::DualTrackConfig;
use attend_core::models::{Recommendation, Track, TrackStats, ValidationRecord, ValidationSummary};
use attend_core::stats;

/// Aggregate validation records into per-track error statistics and a
/// recommendation. An empty window is `Inconclusive`.
pub fn summarize(records: &[ValidationRecord], window_days: u32, config: &DualTrackConfig) -> ValidationSummary {
    let production_errors: Vec<f64> = records.iter().map(|r| r.production_error).collect();
    let experimental_errors: Vec<f64> = records.iter().map(|r| r.experimental_error).collect();
    let production = TrackStats {
        mae: stats::mean(&production_errors),
        std_dev: stats::std_dev(&production_errors),
    };
    let experimental = TrackStats {
        mae: stats::mean(&experimental_errors),
        std_dev: stats::std_dev(&experimental_errors),
    };

    let wins = records
        .iter()
        .filter(|r| r.better_track == Track::Experimental)
        .count();
    let experimental_win_rate = if records.is_empty() {
        0.0
    } else {
        wins as f64 / records.len() as f64
    };
    let relative_improvement = if production.mae > 0.0 {
        (production.mae - experimental.mae) / production.mae
    } else {
        0.0
    };

    let recommendation = if records.is_empty() {
        Recommendation::Inconclusive
    } else {
        recommend(relative_improvement, experimental_win_rate, config)
    };

    ValidationSummary {
        window_days,
        sample_count: records.len(),
        production,
        experimental,
        experimental_win_rate,
        relative_improvement,
        recommendation,
    }
}

fn recommend(improvement: f64, win_rate: f64, config: &DualTrackConfig) -> Recommendation {
    if improvement > config.adopt_improvement && win_rate > config.adopt_win_rate {
        Recommendation::AdoptExperimental
    } else if improvement > config.partial_improvement && win_rate > config.partial_win_rate {
        Recommendation::PartialAdoption
    } else if improvement < config.reject_improvement {
        Recommendation::RejectExperimental
    } else {
        Recommendation::Inconclusive
    }
}
