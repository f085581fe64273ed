use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tss_auth_types::identity::IdentityHeaders;
use tss_core::extract::JsonBody;
use tss_domain::user::UserRole;

use crate::error::RegistryError;
use crate::state::AppState;
use crate::usecase::registration::{GetUserRoleUseCase, RegisterUserInput, RegisterUserUseCase};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub role: UserRole,
    pub authority_code: Option<String>,
}

#[derive(Serialize)]
pub struct RegisteredUserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(serialize_with = "tss_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), RegistryError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        codes: state.authority_code_repo(),
        timeout: state.store_timeout,
    };
    let user = usecase
        .execute(RegisterUserInput {
            email: body.email,
            display_name: body.display_name,
            role: body.role,
            authority_code: body.authority_code,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUserResponse {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            created_at: user.created_at,
        }),
    ))
}

// ── GET /users/{user_id}/role ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserRoleResponse {
    pub role: UserRole,
}

pub async fn get_user_role(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserRoleResponse>, RegistryError> {
    let usecase = GetUserRoleUseCase {
        users: state.user_repo(),
        timeout: state.store_timeout,
    };
    let role = usecase.execute(user_id).await?;
    Ok(Json(UserRoleResponse { role }))
}
