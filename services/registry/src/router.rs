use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use tss_core::health::healthz;
use tss_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    authority_code::{issue_authority_code, list_authority_codes, redeem_authority_code},
    health::readyz,
    user::{get_user_role, register_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Authority codes
        .route("/authority-codes", post(issue_authority_code))
        .route("/authority-codes", get(list_authority_codes))
        .route("/authority-codes/redemption", post(redeem_authority_code))
        // Users
        .route("/users", post(register_user))
        .route("/users/{user_id}/role", get(get_user_role))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
