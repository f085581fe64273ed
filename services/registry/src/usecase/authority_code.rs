use std::time::Duration;

use chrono::Utc;
use rand::RngExt;
use tracing::{info, warn};

use crate::domain::repository::AuthorityCodeRepository;
use crate::domain::types::{AUTHORITY_CODE_LEN, AuthorityCode, MAX_ISSUE_ATTEMPTS, normalize_code};
use crate::error::RegistryError;
use crate::usecase::bounded;

/// Charset for generating authority codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..AUTHORITY_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── Issue ────────────────────────────────────────────────────────────────────

pub struct IssueAuthorityCodeUseCase<A: AuthorityCodeRepository> {
    pub codes: A,
    pub timeout: Duration,
}

impl<A: AuthorityCodeRepository> IssueAuthorityCodeUseCase<A> {
    /// Mint and persist a new code, returning the code string.
    pub async fn execute(&self) -> Result<String, RegistryError> {
        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let code = AuthorityCode::issue(generate_code(), Utc::now());
            let inserted = bounded(
                self.timeout,
                "insert authority code",
                self.codes.insert(&code),
            )
            .await?;
            if inserted {
                info!(code_id = %code.id, attempt, "authority code issued");
                return Ok(code.code);
            }
            warn!(attempt, "generated authority code collided, regenerating");
        }
        Err(RegistryError::StoreUnavailable(anyhow::anyhow!(
            "no unique authority code after {MAX_ISSUE_ATTEMPTS} attempts"
        )))
    }
}

// ── ListUnused ───────────────────────────────────────────────────────────────

pub struct ListUnusedAuthorityCodesUseCase<A: AuthorityCodeRepository> {
    pub codes: A,
    pub timeout: Duration,
}

impl<A: AuthorityCodeRepository> ListUnusedAuthorityCodesUseCase<A> {
    /// Snapshot of currently unused codes; may be stale by the time it is shown.
    pub async fn execute(&self) -> Result<Vec<String>, RegistryError> {
        let unused = bounded(
            self.timeout,
            "list unused authority codes",
            self.codes.list_unused(),
        )
        .await?;
        Ok(unused
            .into_iter()
            .filter(AuthorityCode::is_available)
            .map(|c| c.code)
            .collect())
    }
}

// ── Redeem ───────────────────────────────────────────────────────────────────

pub struct RedeemAuthorityCodeUseCase<A: AuthorityCodeRepository> {
    pub codes: A,
    pub timeout: Duration,
}

impl<A: AuthorityCodeRepository> RedeemAuthorityCodeUseCase<A> {
    /// Consume `raw` exactly once. Unknown, mistyped and already-used codes all
    /// fail with `InvalidOrConsumedCode`.
    pub async fn execute(&self, raw: &str) -> Result<(), RegistryError> {
        let code = normalize_code(raw).ok_or(RegistryError::InvalidOrConsumedCode)?;
        let redeemed = bounded(
            self.timeout,
            "redeem authority code",
            self.codes.redeem(&code, Utc::now()),
        )
        .await?;
        if !redeemed {
            return Err(RegistryError::InvalidOrConsumedCode);
        }
        info!("authority code redeemed");
        Ok(())
    }
}
