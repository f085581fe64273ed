use std::time::Duration;

use crate::infra::simulated::{SimulatedDensityEstimator, SimulatedSignDetector};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone, Default)]
pub struct AppState {
    pub simulated_latency: Duration,
}

impl AppState {
    pub fn density_estimator(&self) -> SimulatedDensityEstimator {
        SimulatedDensityEstimator {
            latency: self.simulated_latency,
        }
    }

    pub fn sign_detector(&self) -> SimulatedSignDetector {
        SimulatedSignDetector {
            latency: self.simulated_latency,
        }
    }
}
