use axum::{extract::State, http::StatusCode};

use tss_core::health::probe_status;

use crate::state::AppState;

/// `GET /readyz`: ready once the database answers a ping within the store timeout.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    let outcome = match tokio::time::timeout(state.store_timeout, state.db.ping()).await {
        Ok(ping) => ping.map_err(|e| e.to_string()),
        Err(_) => Err(format!("ping timed out after {:?}", state.store_timeout)),
    };
    probe_status("database", outcome)
}
