/// Repository Layer
///
/// Object-safe repository traits for user and refresh-token storage,
/// with PostgreSQL implementations. The session core depends only on
/// the traits; the concrete stores are injected at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AuthError};

/// A stored user row, consumed read-only outside registration
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_verified: bool,
}

/// Fields needed to create a user; the id is minted on insert
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: Option<String>,
    pub hashed_password: String,
}

/// Registry entry for an issued refresh token
///
/// `revoked` is monotonic: it flips false to true exactly once and is
/// never reset. Expired rows stay in place; expiry is enforced by
/// comparison at validation time, not by deletion.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub jti: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError>;
    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError>;
}

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a new registry entry. A duplicate `jti` is a fatal
    /// invariant violation (`Conflict`), never a retryable condition.
    async fn record(
        &self,
        jti: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Fetch the entry only while `revoked = false`. Callers check
    /// `expires_at` against the current time themselves.
    async fn find_active(&self, jti: &str) -> Result<Option<RefreshTokenRecord>, AppError>;

    /// Flip `revoked` to true. Revoking an unknown or already-revoked
    /// id is a no-op, not an error.
    async fn revoke(&self, jti: &str) -> Result<(), AppError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, full_name, hashed_password, is_active, is_verified
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, full_name, hashed_password, is_active, is_verified
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let created = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, email, full_name, hashed_password, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, full_name, hashed_password, is_active, is_verified
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.hashed_password)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}

pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn record(
        &self,
        jti: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (jti, user_id, expires_at, revoked, created_at)
            VALUES ($1, $2, $3, FALSE, $4)
            "#,
        )
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                tracing::error!(jti = %jti, "Refresh token id collision");
                AppError::Auth(AuthError::Conflict)
            } else {
                AppError::from(e)
            }
        })?;

        Ok(())
    }

    async fn find_active(&self, jti: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            SELECT jti, user_id, expires_at, revoked
            FROM refresh_tokens
            WHERE jti = $1 AND revoked = FALSE
            "#,
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn revoke(&self, jti: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE jti = $1
            "#,
        )
        .bind(jti)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(jti = %jti, "Revoke on unknown refresh token id");
        }

        Ok(())
    }
}
