use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use tss_auth_types::identity::IdentityHeaders;
use tss_core::extract::JsonBody;

use crate::error::RegistryError;
use crate::state::AppState;
use crate::usecase::authority_code::{
    IssueAuthorityCodeUseCase, ListUnusedAuthorityCodesUseCase, RedeemAuthorityCodeUseCase,
};

fn require_authority(identity: &IdentityHeaders) -> Result<(), RegistryError> {
    if !identity.is_authority() {
        return Err(RegistryError::Forbidden);
    }
    Ok(())
}

// ── POST /authority-codes ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct IssuedCodeResponse {
    pub code: String,
}

pub async fn issue_authority_code(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<IssuedCodeResponse>), RegistryError> {
    require_authority(&identity)?;
    let usecase = IssueAuthorityCodeUseCase {
        codes: state.authority_code_repo(),
        timeout: state.store_timeout,
    };
    let code = usecase.execute().await?;
    tracing::info!(issued_by = %identity.user_id, "authority code issued via console");
    Ok((StatusCode::CREATED, Json(IssuedCodeResponse { code })))
}

// ── GET /authority-codes ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UnusedCodesResponse {
    pub codes: Vec<String>,
}

pub async fn list_authority_codes(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UnusedCodesResponse>, RegistryError> {
    require_authority(&identity)?;
    let usecase = ListUnusedAuthorityCodesUseCase {
        codes: state.authority_code_repo(),
        timeout: state.store_timeout,
    };
    let codes = usecase.execute().await?;
    Ok(Json(UnusedCodesResponse { codes }))
}

// ── POST /authority-codes/redemption ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct RedeemCodeRequest {
    pub code: String,
}

/// Console-side consumption of a code without creating an account. Account
/// creation redeems through `POST /users` instead.
pub async fn redeem_authority_code(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RedeemCodeRequest>,
) -> Result<StatusCode, RegistryError> {
    require_authority(&identity)?;
    let usecase = RedeemAuthorityCodeUseCase {
        codes: state.authority_code_repo(),
        timeout: state.store_timeout,
    };
    usecase.execute(&body.code).await?;
    tracing::info!(redeemed_by = %identity.user_id, "authority code redeemed via console");
    Ok(StatusCode::NO_CONTENT)
}
