pub mod authority_code;
pub mod registration;

use std::future::Future;
use std::time::Duration;

use crate::error::RegistryError;

/// Run one store operation under `limit`. Expiry surfaces as `StoreUnavailable`;
/// the abandoned operation may still complete on the store side.
pub(crate) async fn bounded<T, F>(limit: Duration, op: &'static str, fut: F) -> Result<T, RegistryError>
where
    F: Future<Output = Result<T, RegistryError>>,
{
    tokio::time::timeout(limit, fut).await.map_err(|_| {
        RegistryError::StoreUnavailable(anyhow::anyhow!("{op} timed out after {limit:?}"))
    })?
}
