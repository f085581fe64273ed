#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{AuthorityCode, User};
use crate::error::RegistryError;

/// Repository for authority registration codes.
///
/// Implementations must evaluate every call against the store; nothing is
/// cached between calls.
pub trait AuthorityCodeRepository: Send + Sync {
    /// Persist a newly issued code in a single write.
    /// Returns `false` if `code.code` collides with an existing record.
    async fn insert(&self, code: &AuthorityCode) -> Result<bool, RegistryError>;

    /// All codes with `used = false`, in no particular order.
    async fn list_unused(&self) -> Result<Vec<AuthorityCode>, RegistryError>;

    /// Flip `used` on the record matching `code`, guarded by `used = false`, as
    /// one indivisible store operation. Returns `true` only for the call that
    /// performed the flip.
    async fn redeem(&self, code: &str, used_at: DateTime<Utc>) -> Result<bool, RegistryError>;

    /// Redeem `code` and insert `user` in the same transaction, recording the
    /// user as the redeemer. Returns `false` (and writes nothing) when the code
    /// is not available. A failed user insert rolls the redemption back.
    async fn redeem_for_user(&self, code: &str, user: &User) -> Result<bool, RegistryError>;
}

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError>;

    /// Fails with `UserAlreadyExists` on a duplicate email.
    async fn create(&self, user: &User) -> Result<(), RegistryError>;
}
