//! Identity of the caller, as asserted by the upstream gateway.

use std::str::FromStr;

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use tss_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-tss-user-id";
pub const USER_ROLE_HEADER: &str = "x-tss-user-role";

/// Authenticated caller. Extraction fails with 401 when either header is
/// missing or unparseable; role checks (403) belong to the handler.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl IdentityHeaders {
    pub fn is_authority(&self) -> bool {
        self.user_role.is_authority()
    }
}

fn header<T: FromStr>(parts: &Parts, name: &str) -> Option<T> {
    parts.headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Headers are read before the future is built so it does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = header::<Uuid>(parts, USER_ID_HEADER)
            .zip(header::<UserRole>(parts, USER_ROLE_HEADER))
            .map(|(user_id, user_role)| Self { user_id, user_role })
            .ok_or(StatusCode::UNAUTHORIZED);
        std::future::ready(identity)
    }
}
