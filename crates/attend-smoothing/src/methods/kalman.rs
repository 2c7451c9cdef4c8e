//! Scalar Kalman filter over a constant-level model.

/// 1-D Kalman filter with random-walk state and noisy measurements.
#[derive(Debug, Clone, Copy)]
pub struct KalmanFilter1D {
    /// State estimate.
    x: f64,
    /// Error covariance.
    p: f64,
    /// Process noise.
    q: f64,
    /// Measurement noise.
    r: f64,
}

impl KalmanFilter1D {
    pub fn new(initial: f64, initial_covariance: f64, process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            x: initial,
            p: initial_covariance,
            q: process_noise,
            r: measurement_noise,
        }
    }

    /// Predict then update with one measurement.
    pub fn update(&mut self, measurement: f64) {
        let p_pred = self.p + self.q;
        let k = p_pred / (p_pred + self.r);
        self.x += k * (measurement - self.x);
        self.p = (1.0 - k) * p_pred;
    }

    pub fn estimate(&self) -> f64 {
        self.x
    }

    pub fn covariance(&self) -> f64 {
        self.p
    }
}

/// Run the filter over `values`, seeded with the first one.
pub fn kalman_smooth(values: &[f64], initial_covariance: f64, q: f64, r: f64) -> f64 {
    let Some((&first, rest)) = values.split_first() else {
        return 0.0;
    };
    let mut filter = KalmanFilter1D::new(first, initial_covariance, q, r);
    for &v in rest {
        filter.update(v);
    }
    filter.estimate()
}
