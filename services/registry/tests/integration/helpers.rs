use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use uuid::Uuid;

use tss_domain::user::UserRole;
use tss_registry::domain::repository::{AuthorityCodeRepository, UserRepository};
use tss_registry::domain::types::{AuthorityCode, User};
use tss_registry::error::RegistryError;
use tss_registry::state::AppState;
use tss_registry_schema::{authority_codes, users};

pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

// ── MockStore ────────────────────────────────────────────────────────────────

/// In-memory stand-in for the database. Every repository handle created from
/// one store shares the same records.
#[derive(Clone, Default)]
pub struct MockStore {
    pub codes: Arc<Mutex<Vec<AuthorityCode>>>,
    pub users: Arc<Mutex<Vec<User>>>,
    /// Every call fails as if the database were unreachable.
    pub unavailable: bool,
    /// Number of upcoming inserts reported as collisions.
    pub forced_collisions: Arc<AtomicU32>,
    /// Artificial latency applied to each call.
    pub delay: Option<Duration>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn with_codes(codes: &[&str]) -> Self {
        let store = Self::new();
        store.codes.lock().unwrap().extend(
            codes
                .iter()
                .map(|c| AuthorityCode::issue((*c).to_owned(), Utc::now())),
        );
        store
    }

    pub fn collide_next(&self, n: u32) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }

    pub fn code_repo(&self) -> MockAuthorityCodeRepo {
        MockAuthorityCodeRepo {
            store: self.clone(),
        }
    }

    pub fn user_repo(&self) -> MockUserRepo {
        MockUserRepo {
            store: self.clone(),
        }
    }

    pub fn find_code(&self, code: &str) -> Option<AuthorityCode> {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.code == code)
            .cloned()
    }

    async fn enter(&self) -> Result<(), RegistryError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(RegistryError::StoreUnavailable(anyhow::anyhow!(
                "connection refused"
            )));
        }
        Ok(())
    }
}

// ── MockAuthorityCodeRepo ────────────────────────────────────────────────────

pub struct MockAuthorityCodeRepo {
    pub store: MockStore,
}

impl AuthorityCodeRepository for MockAuthorityCodeRepo {
    async fn insert(&self, code: &AuthorityCode) -> Result<bool, RegistryError> {
        self.store.enter().await?;
        let pending = &self.store.forced_collisions;
        if pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Ok(false);
        }
        let mut codes = self.store.codes.lock().unwrap();
        if codes.iter().any(|c| c.code == code.code) {
            return Ok(false);
        }
        codes.push(code.clone());
        Ok(true)
    }

    async fn list_unused(&self) -> Result<Vec<AuthorityCode>, RegistryError> {
        self.store.enter().await?;
        Ok(self
            .store
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !c.used)
            .cloned()
            .collect())
    }

    async fn redeem(&self, code: &str, used_at: DateTime<Utc>) -> Result<bool, RegistryError> {
        self.store.enter().await?;
        // Check and flip under one lock, mirroring the conditional update.
        let mut codes = self.store.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.code == code && !c.used) {
            Some(c) => {
                c.used = true;
                c.used_at = Some(used_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn redeem_for_user(&self, code: &str, user: &User) -> Result<bool, RegistryError> {
        self.store.enter().await?;
        let mut codes = self.store.codes.lock().unwrap();
        let mut users = self.store.users.lock().unwrap();
        let Some(record) = codes.iter_mut().find(|c| c.code == code && !c.used) else {
            return Ok(false);
        };
        if users.iter().any(|u| u.email == user.email) {
            return Err(RegistryError::UserAlreadyExists);
        }
        record.used = true;
        record.used_at = Some(user.created_at);
        record.used_by = Some(user.id);
        users.push(user.clone());
        Ok(true)
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub store: MockStore,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError> {
        self.store.enter().await?;
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), RegistryError> {
        self.store.enter().await?;
        let mut users = self.store.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RegistryError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }
}

// ── SQLite-backed store ──────────────────────────────────────────────────────

/// Fresh in-memory SQLite database with the registry tables created from the
/// entity definitions. A single pooled connection keeps the database alive.
pub async fn sqlite_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();
    db.execute(backend.build(&schema.create_table_from_entity(users::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(authority_codes::Entity)))
        .await
        .unwrap();
    db
}

pub async fn sqlite_state() -> AppState {
    AppState {
        db: sqlite_db().await,
        store_timeout: TEST_TIMEOUT,
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user(email: &str, role: UserRole) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        display_name: "Test User".to_owned(),
        role,
        authority_code: None,
        created_at: Utc::now(),
    }
}
