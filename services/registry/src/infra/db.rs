use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr, TransactionError, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use tss_domain::user::UserRole;
use tss_registry_schema::{authority_codes, users};

use crate::domain::repository::{AuthorityCodeRepository, UserRepository};
use crate::domain::types::{AuthorityCode, User};
use crate::error::RegistryError;

// ── AuthorityCode repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAuthorityCodeRepository {
    pub db: DatabaseConnection,
}

impl AuthorityCodeRepository for DbAuthorityCodeRepository {
    async fn insert(&self, code: &AuthorityCode) -> Result<bool, RegistryError> {
        let result = authority_codes::Entity::insert(authority_code_to_active(code))
            .exec_without_returning(&self.db)
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context("insert authority code")
                .into()),
        }
    }

    async fn list_unused(&self) -> Result<Vec<AuthorityCode>, RegistryError> {
        let models = authority_codes::Entity::find()
            .filter(authority_codes::Column::Used.eq(false))
            .all(&self.db)
            .await
            .context("list unused authority codes")?;
        Ok(models.into_iter().map(authority_code_from_model).collect())
    }

    async fn redeem(&self, code: &str, used_at: DateTime<Utc>) -> Result<bool, RegistryError> {
        let redeemed = flip_unused(&self.db, code, used_at)
            .await
            .context("redeem authority code")?;
        Ok(redeemed)
    }

    async fn redeem_for_user(&self, code: &str, user: &User) -> Result<bool, RegistryError> {
        let code = code.to_owned();
        let user = user.clone();
        let outcome = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    if !flip_unused(txn, &code, user.created_at).await? {
                        return Ok(false);
                    }
                    users::Entity::insert(user_to_active(&user))
                        .exec_without_returning(txn)
                        .await?;
                    authority_codes::Entity::update_many()
                        .col_expr(authority_codes::Column::UsedBy, Expr::value(user.id))
                        .filter(authority_codes::Column::Code.eq(code.as_str()))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await;
        match outcome {
            Ok(redeemed) => Ok(redeemed),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(RegistryError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("redeem authority code for new user")
                .into()),
        }
    }
}

/// Conditional update: `SET used = true, used_at = $2 WHERE code = $1 AND used = false`.
/// The row lock taken by the update serialises concurrent callers, and the
/// predicate is re-checked after the lock, so at most one caller sees a row affected.
async fn flip_unused<C>(conn: &C, code: &str, used_at: DateTime<Utc>) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let result = authority_codes::Entity::update_many()
        .col_expr(authority_codes::Column::Used, Expr::value(true))
        .col_expr(authority_codes::Column::UsedAt, Expr::value(used_at))
        .filter(authority_codes::Column::Code.eq(code))
        .filter(authority_codes::Column::Used.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

fn authority_code_to_active(code: &AuthorityCode) -> authority_codes::ActiveModel {
    authority_codes::ActiveModel {
        id: Set(code.id),
        code: Set(code.code.clone()),
        used: Set(code.used),
        created_at: Set(code.created_at),
        used_at: Set(code.used_at),
        used_by: Set(code.used_by),
    }
}

fn authority_code_from_model(model: authority_codes::Model) -> AuthorityCode {
    AuthorityCode {
        id: model.id,
        code: model.code,
        used: model.used,
        created_at: model.created_at,
        used_at: model.used_at,
        used_by: model.used_by,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), RegistryError> {
        let result = users::Entity::insert(user_to_active(user))
            .exec_without_returning(&self.db)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(RegistryError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }
}

fn user_to_active(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        email: Set(user.email.clone()),
        display_name: Set(user.display_name.clone()),
        role: Set(user.role.as_str().to_owned()),
        authority_code: Set(user.authority_code.clone()),
        created_at: Set(user.created_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, RegistryError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has unreadable role", model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        display_name: model.display_name,
        role,
        authority_code: model.authority_code,
        created_at: model.created_at,
    })
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
