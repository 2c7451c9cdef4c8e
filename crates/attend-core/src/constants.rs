// Fixed numeric constants shared across the workspace.

/// z-score of the two-sided 80% interval.
pub const Z_80: f64 = 1.28;
/// z-score of the two-sided 95% interval.
pub const Z_95: f64 = 1.96;

/// Learned reliability never leaves this range.
pub const RELIABILITY_MIN: f64 = 0.3;
pub const RELIABILITY_MAX: f64 = 0.95;

/// Tolerance on `w_base + w_weather + w_ai == 1`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// AI event factor clamp range.
pub const AI_FACTOR_MIN: f64 = 0.7;
pub const AI_FACTOR_MAX: f64 = 1.3;

/// Weather factor clamp range.
pub const WEATHER_FACTOR_MIN: f64 = 0.85;
pub const WEATHER_FACTOR_MAX: f64 = 1.15;

/// Per-point confidence clamp used by the confidence-weighted mean.
pub const CONFIDENCE_WEIGHT_MIN: f64 = 0.1;
pub const CONFIDENCE_WEIGHT_MAX: f64 = 1.0;

/// Never trim more than this share of points in the trimmed mean.
pub const MAX_TOTAL_TRIM_FRACTION: f64 = 0.25;

/// Number of half-hour slots in a day.
pub const SLOTS_PER_DAY: u8 = 48;
