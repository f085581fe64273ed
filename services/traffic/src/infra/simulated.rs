//! Random-number stand-ins for the detection capabilities. No image is read;
//! the optional latency imitates model inference time.

use std::time::Duration;

use rand::RngExt;

use crate::domain::detection::{DensityEstimate, DensityEstimator, Frame, SignDetection, SignDetector};

/// Speed limits a simulated sign can carry, in km/h.
pub const SIMULATED_SPEED_LIMITS: [u32; 5] = [20, 30, 40, 50, 60];

#[derive(Clone, Default)]
pub struct SimulatedDensityEstimator {
    pub latency: Duration,
}

impl DensityEstimator for SimulatedDensityEstimator {
    async fn estimate(&self, frame: &Frame) -> anyhow::Result<DensityEstimate> {
        simulate_latency(self.latency).await;
        let estimate = random_density();
        tracing::debug!(camera_id = %frame.camera_id, density = estimate.density, "simulated density");
        Ok(estimate)
    }
}

#[derive(Clone, Default)]
pub struct SimulatedSignDetector {
    pub latency: Duration,
}

impl SignDetector for SimulatedSignDetector {
    async fn detect(&self, frame: &Frame) -> anyhow::Result<SignDetection> {
        simulate_latency(self.latency).await;
        let detection = random_sign();
        tracing::debug!(camera_id = %frame.camera_id, detected = detection.detected, "simulated sign");
        Ok(detection)
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

// The thread-local RNG is not `Send`; keep it inside these synchronous helpers.
fn random_density() -> DensityEstimate {
    let mut rng = rand::rng();
    DensityEstimate {
        density: rng.random_range(0..100),
        vehicle_count: rng.random_range(0..50),
        pedestrian_count: rng.random_range(0..30),
        speed_violations: rng.random_range(0..5),
        confidence: rng.random_range(0.7..1.0),
    }
}

fn random_sign() -> SignDetection {
    let mut rng = rand::rng();
    if !rng.random_bool(0.7) {
        return SignDetection {
            detected: false,
            speed_limit: None,
            confidence: 0.0,
        };
    }
    SignDetection {
        detected: true,
        speed_limit: Some(SIMULATED_SPEED_LIMITS[rng.random_range(0..SIMULATED_SPEED_LIMITS.len())]),
        confidence: rng.random_range(0.7..1.0),
    }
}
