#![allow(async_fn_in_trait)]

use serde::Serialize;
use url::Url;

/// A single camera frame submitted for analysis.
#[derive(Debug, Clone)]
pub struct Frame {
    pub camera_id: String,
    pub image_url: Url,
}

/// Estimated traffic load in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEstimate {
    /// Road occupancy, 0..=100.
    pub density: u8,
    pub vehicle_count: u32,
    pub pedestrian_count: u32,
    /// Vehicles seen over the limit in this frame.
    pub speed_violations: u32,
    pub confidence: f64,
}

/// Speed-limit sign recognition result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignDetection {
    pub detected: bool,
    /// km/h; present only when a sign was detected.
    pub speed_limit: Option<u32>,
    pub confidence: f64,
}

/// Capability: estimate vehicle density from a frame.
pub trait DensityEstimator: Send + Sync {
    async fn estimate(&self, frame: &Frame) -> anyhow::Result<DensityEstimate>;
}

/// Capability: find and read a speed-limit sign in a frame.
pub trait SignDetector: Send + Sync {
    async fn detect(&self, frame: &Frame) -> anyhow::Result<SignDetection>;
}
