use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Registry service error variants.
///
/// Store failures of any kind (connection loss, timeout, exhausted code
/// generation) collapse into `StoreUnavailable`; the cause is logged, never
/// returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid or already-used code")]
    InvalidOrConsumedCode,
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("service temporarily unavailable")]
    StoreUnavailable(#[from] anyhow::Error),
}

impl RegistryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOrConsumedCode => "INVALID_OR_CONSUMED_CODE",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Whether the caller may retry the same request later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidOrConsumedCode | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        if let Self::StoreUnavailable(ref e) = self {
            tracing::error!(error = ?e, kind = "STORE_UNAVAILABLE", "store unavailable");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
