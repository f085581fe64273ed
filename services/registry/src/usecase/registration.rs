use std::time::Duration;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use tss_domain::user::UserRole;

use crate::domain::repository::{AuthorityCodeRepository, UserRepository};
use crate::domain::types::{User, normalize_code};
use crate::error::RegistryError;
use crate::usecase::bounded;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub authority_code: Option<String>,
}

pub struct RegisterUserUseCase<U, A>
where
    U: UserRepository,
    A: AuthorityCodeRepository,
{
    pub users: U,
    pub codes: A,
    pub timeout: Duration,
}

impl<U, A> RegisterUserUseCase<U, A>
where
    U: UserRepository,
    A: AuthorityCodeRepository,
{
    /// Create an account. Authority accounts are created only together with a
    /// successful redemption of their code.
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, RegistryError> {
        let email = input.email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(RegistryError::InvalidRequest("email is malformed"));
        }
        let display_name = input.display_name.trim().to_owned();
        if display_name.is_empty() {
            return Err(RegistryError::InvalidRequest("display name is required"));
        }

        let mut user = User {
            id: Uuid::now_v7(),
            email,
            display_name,
            role: input.role,
            authority_code: None,
            created_at: Utc::now(),
        };

        match input.role {
            UserRole::Driver => {
                bounded(self.timeout, "create user", self.users.create(&user)).await?;
            }
            UserRole::Authority => {
                let code = input
                    .authority_code
                    .as_deref()
                    .and_then(normalize_code)
                    .ok_or(RegistryError::InvalidOrConsumedCode)?;
                user.authority_code = Some(code.clone());
                let redeemed = bounded(
                    self.timeout,
                    "redeem authority code for new user",
                    self.codes.redeem_for_user(&code, &user),
                )
                .await?;
                if !redeemed {
                    return Err(RegistryError::InvalidOrConsumedCode);
                }
            }
        }

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }
}

// ── GetRole ──────────────────────────────────────────────────────────────────

pub struct GetUserRoleUseCase<U: UserRepository> {
    pub users: U,
    pub timeout: Duration,
}

impl<U: UserRepository> GetUserRoleUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserRole, RegistryError> {
        bounded(self.timeout, "find user", self.users.find_by_id(user_id))
            .await?
            .map(|u| u.role)
            .ok_or(RegistryError::UserNotFound)
    }
}
