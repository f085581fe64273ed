use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use tss_core::health::{healthz, readyz};
use tss_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::traffic::{analyze_traffic, create_speed_warning};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Traffic
        .route("/traffic/analysis", post(analyze_traffic))
        .route("/traffic/speed-warnings", post(create_speed_warning))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
