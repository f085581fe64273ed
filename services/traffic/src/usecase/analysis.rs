use std::time::Instant;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use tss_core::error::AppError;

use crate::domain::detection::{DensityEstimate, DensityEstimator, Frame, SignDetection, SignDetector};

pub struct AnalyzeTrafficInput {
    pub camera_id: String,
    pub location: String,
    pub image_url: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct TrafficAnalysis {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub camera_id: String,
    pub traffic: DensityEstimate,
    pub speed_limit: SignDetection,
    pub processing_time_ms: u64,
}

pub struct AnalyzeTrafficUseCase<D, S>
where
    D: DensityEstimator,
    S: SignDetector,
{
    pub density: D,
    pub signs: S,
}

impl<D, S> AnalyzeTrafficUseCase<D, S>
where
    D: DensityEstimator,
    S: SignDetector,
{
    /// Run both detectors on the frame concurrently and combine the results.
    pub async fn execute(&self, input: AnalyzeTrafficInput) -> Result<TrafficAnalysis, AppError> {
        let camera_id = required(input.camera_id, "camera_id")?;
        let location = required(input.location, "location")?;
        let image_url = Url::parse(input.image_url.trim())
            .map_err(|_| AppError::InvalidRequest("image_url must be an absolute URL".into()))?;

        let frame = Frame {
            camera_id: camera_id.clone(),
            image_url,
        };
        let started = Instant::now();
        let (traffic, speed_limit) =
            futures::try_join!(self.density.estimate(&frame), self.signs.detect(&frame))?;
        let processing_time_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            camera_id = %camera_id,
            density = traffic.density,
            sign_detected = speed_limit.detected,
            processing_time_ms,
            "traffic frame analysed"
        );

        Ok(TrafficAnalysis {
            id: Uuid::now_v7(),
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
            location,
            camera_id,
            traffic,
            speed_limit,
            processing_time_ms,
        })
    }
}

pub(crate) fn required(value: String, field: &str) -> Result<String, AppError> {
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} is required")));
    }
    Ok(value)
}
