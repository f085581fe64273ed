use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAuthorityCodeRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
///
/// The connection is opened and closed by the host binary; repositories are
/// cheap handles onto it.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store_timeout: Duration,
}

impl AppState {
    pub fn authority_code_repo(&self) -> DbAuthorityCodeRepository {
        DbAuthorityCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}
