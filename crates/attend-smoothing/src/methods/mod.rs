//! Individual smoothing estimators. Each is a pure function over already
//! ordered inputs and is total: empty input yields 0.0.

pub mod averages;
pub mod ensemble;
pub mod ewma;
pub mod kalman;
pub mod robust;
pub mod time_window;

pub use averages::{confidence_weighted, simple_average};
pub use ensemble::ensemble;
pub use ewma::ewma;
pub use kalman::{kalman_smooth, KalmanFilter1D};
pub use robust::{trimmed_mean, variance_filtered, VarianceFilterOutcome};
pub use time_window::{time_window, time_window_weights, TimeWeighting};
