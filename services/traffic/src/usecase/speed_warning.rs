use chrono::{DateTime, Utc};
use uuid::Uuid;

use tss_core::error::AppError;

use crate::domain::warning::Severity;
use crate::usecase::analysis::required;

pub struct SpeedWarningInput {
    pub camera_id: String,
    pub location: String,
    pub detected_speed: f64,
    pub speed_limit: f64,
    pub vehicle_type: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct SpeedWarning {
    pub id: Uuid,
    pub camera_id: String,
    pub location: String,
    pub detected_speed: f64,
    pub speed_limit: f64,
    pub speed_difference: f64,
    pub severity: Severity,
    pub message: String,
    pub vehicle_type: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

/// Build a warning record for a vehicle observed by a camera.
pub fn build_speed_warning(input: SpeedWarningInput) -> Result<SpeedWarning, AppError> {
    let camera_id = required(input.camera_id, "camera_id")?;
    let location = required(input.location, "location")?;
    for (name, value) in [
        ("detected_speed", input.detected_speed),
        ("speed_limit", input.speed_limit),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::InvalidRequest(format!("{name} must be positive")));
        }
    }

    let speed_difference = input.detected_speed - input.speed_limit;
    let severity = Severity::from_excess(speed_difference);
    let message = severity.message(speed_difference, &location);
    let vehicle_type = input
        .vehicle_type
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "Unknown".to_owned());

    Ok(SpeedWarning {
        id: Uuid::now_v7(),
        camera_id,
        location,
        detected_speed: input.detected_speed,
        speed_limit: input.speed_limit,
        speed_difference,
        severity,
        message,
        vehicle_type,
        timestamp: input.timestamp.unwrap_or_else(Utc::now),
        acknowledged: false,
    })
}
