use chrono::{DateTime, Utc};
use uuid::Uuid;

use tss_domain::user::UserRole;

/// One-time registration code that gates creation of an authority account.
///
/// `used` only ever moves from `false` to `true`.
#[derive(Debug, Clone)]
pub struct AuthorityCode {
    pub id: Uuid,
    pub code: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    /// Account created with this code, when redeemed through registration.
    pub used_by: Option<Uuid>,
}

impl AuthorityCode {
    /// A freshly issued, unused code.
    pub fn issue(code: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            code,
            used: false,
            created_at: now,
            used_at: None,
            used_by: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.used
    }
}

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub authority_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Authority code length in characters.
pub const AUTHORITY_CODE_LEN: usize = 8;

/// Insert attempts before issuance gives up on finding a non-colliding code.
pub const MAX_ISSUE_ATTEMPTS: u32 = 5;

/// Canonical form of a user-supplied code: surrounding whitespace removed,
/// ASCII upper-cased. Returns `None` for input that cannot be a code.
pub fn normalize_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(code.to_ascii_uppercase())
}
