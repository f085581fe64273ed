use serde::Serialize;

/// How far over the limit a vehicle was travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// More than 20 km/h over is `High`, more than 10 is `Medium`.
    pub fn from_excess(excess: f64) -> Self {
        if excess > 20.0 {
            Self::High
        } else if excess > 10.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn message(self, excess: f64, location: &str) -> String {
        match self {
            Self::High => format!(
                "SEVERE WARNING: Vehicle exceeding speed limit by {excess} km/h in {location}"
            ),
            Self::Medium => {
                format!("WARNING: Vehicle exceeding speed limit by {excess} km/h in {location}")
            }
            Self::Low => format!("NOTICE: Vehicle slightly exceeding speed limit in {location}"),
        }
    }
}
