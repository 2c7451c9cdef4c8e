// Single source of truth for all default values.

// --- Smoothing ---
pub const DEFAULT_EWMA_ALPHA: f64 = 0.65;
pub const DEFAULT_TRIM_PERCENT: f64 = 0.10;
pub const DEFAULT_VARIANCE_THRESHOLD: f64 = 1.5;
pub const DEFAULT_KALMAN_PROCESS_NOISE: f64 = 1.0;
pub const DEFAULT_KALMAN_MEASUREMENT_NOISE: f64 = 10.0;
pub const DEFAULT_KALMAN_INITIAL_COVARIANCE: f64 = 1.0;
pub const DEFAULT_ENSEMBLE_EWMA: f64 = 0.30;
pub const DEFAULT_ENSEMBLE_TIME_WINDOW: f64 = 0.25;
pub const DEFAULT_ENSEMBLE_TRIMMED_MEAN: f64 = 0.20;
pub const DEFAULT_ENSEMBLE_KALMAN: f64 = 0.25;
pub const DEFAULT_STABLE_CV: f64 = 0.05;
pub const DEFAULT_VOLATILE_CV: f64 = 0.15;

// --- Fusion ---
pub const DEFAULT_BASE_STD: f64 = 15.0;
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_HISTORY_CAPACITY: usize = 90;
pub const DEFAULT_MIN_HISTORY_OBSERVATIONS: usize = 10;

// --- Dual track ---
pub const DEFAULT_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_MIN_SAMPLES: usize = 30;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_EXPERIMENTAL_SHIFT: f64 = 0.05;
pub const DEFAULT_MIN_BASE_WEIGHT: f64 = 0.70;
pub const DEFAULT_MAX_AI_WEIGHT: f64 = 0.20;
pub const DEFAULT_W_BASE: f64 = 0.80;
pub const DEFAULT_W_WEATHER: f64 = 0.10;
pub const DEFAULT_W_AI: f64 = 0.10;
pub const DEFAULT_GRID_STEP: f64 = 0.01;
pub const DEFAULT_SIGNIFICANCE_Z: f64 = 1.96;
pub const DEFAULT_MIN_IMPROVEMENT_PCT: f64 = 1.0;
pub const DEFAULT_ADOPT_IMPROVEMENT: f64 = 0.05;
pub const DEFAULT_ADOPT_WIN_RATE: f64 = 0.60;
pub const DEFAULT_PARTIAL_IMPROVEMENT: f64 = 0.02;
pub const DEFAULT_PARTIAL_WIN_RATE: f64 = 0.55;
pub const DEFAULT_REJECT_IMPROVEMENT: f64 = -0.05;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "attend.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
