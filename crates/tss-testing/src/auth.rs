//! Mock identity helpers for integration tests.
//!
//! Services behind the gateway receive `x-tss-user-id` + `x-tss-user-role` headers
//! injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use tss_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use tss_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn authority() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Authority)
    }

    pub fn driver() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Driver)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from_static(self.user_role.as_str()),
        );
        map
    }
}
