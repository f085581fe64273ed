use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tss_core::error::AppError;
use tss_core::extract::JsonBody;

use crate::domain::detection::{DensityEstimate, SignDetection};
use crate::domain::warning::Severity;
use crate::state::AppState;
use crate::usecase::analysis::{AnalyzeTrafficInput, AnalyzeTrafficUseCase};
use crate::usecase::speed_warning::{SpeedWarningInput, build_speed_warning};

// ── POST /traffic/analysis ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnalyzeTrafficRequest {
    pub camera_id: String,
    pub location: String,
    pub image_url: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct TrafficAnalysisResponse {
    pub id: String,
    #[serde(serialize_with = "tss_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub camera_id: String,
    pub traffic: DensityEstimate,
    pub speed_limit: SignDetection,
    pub processing_time_ms: u64,
}

pub async fn analyze_traffic(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AnalyzeTrafficRequest>,
) -> Result<Json<TrafficAnalysisResponse>, AppError> {
    let usecase = AnalyzeTrafficUseCase {
        density: state.density_estimator(),
        signs: state.sign_detector(),
    };
    let analysis = usecase
        .execute(AnalyzeTrafficInput {
            camera_id: body.camera_id,
            location: body.location,
            image_url: body.image_url,
            timestamp: body.timestamp,
        })
        .await?;
    Ok(Json(TrafficAnalysisResponse {
        id: analysis.id.to_string(),
        timestamp: analysis.timestamp,
        location: analysis.location,
        camera_id: analysis.camera_id,
        traffic: analysis.traffic,
        speed_limit: analysis.speed_limit,
        processing_time_ms: analysis.processing_time_ms,
    }))
}

// ── POST /traffic/speed-warnings ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SpeedWarningRequest {
    pub camera_id: String,
    pub location: String,
    pub detected_speed: f64,
    pub speed_limit: f64,
    pub vehicle_type: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct SpeedWarningResponse {
    pub id: String,
    pub camera_id: String,
    pub location: String,
    pub detected_speed: f64,
    pub speed_limit: f64,
    pub speed_difference: f64,
    pub severity: Severity,
    pub message: String,
    pub vehicle_type: String,
    #[serde(serialize_with = "tss_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

pub async fn create_speed_warning(
    JsonBody(body): JsonBody<SpeedWarningRequest>,
) -> Result<Json<SpeedWarningResponse>, AppError> {
    let warning = build_speed_warning(SpeedWarningInput {
        camera_id: body.camera_id,
        location: body.location,
        detected_speed: body.detected_speed,
        speed_limit: body.speed_limit,
        vehicle_type: body.vehicle_type,
        timestamp: body.timestamp,
    })?;
    tracing::info!(
        camera_id = %warning.camera_id,
        severity = ?warning.severity,
        speed_difference = warning.speed_difference,
        "speed warning raised"
    );
    Ok(Json(SpeedWarningResponse {
        id: warning.id.to_string(),
        camera_id: warning.camera_id,
        location: warning.location,
        detected_speed: warning.detected_speed,
        speed_limit: warning.speed_limit,
        speed_difference: warning.speed_difference,
        severity: warning.severity,
        message: warning.message,
        vehicle_type: warning.vehicle_type,
        timestamp: warning.timestamp,
        acknowledged: warning.acknowledged,
    }))
}
