use std::fmt::Display;

use axum::http::StatusCode;

/// `GET /healthz`: the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` for services with nothing to wait on.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Readiness status for a service gated on one dependency probe.
pub fn probe_status<E: Display>(dependency: &str, outcome: Result<(), E>) -> StatusCode {
    match outcome {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(dependency, error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
