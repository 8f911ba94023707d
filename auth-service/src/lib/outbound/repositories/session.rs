use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::SessionRepository;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: &PgRow) -> Result<Session, AuthError> {
        Ok(Session {
            token_id: row.try_get("jti")?,
            user_id: UserId(row.try_get("user_id")?),
            created_at: row.try_get("created_at")?,
            revoked_at: row.try_get("revoked_at")?,
        })
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, user_id: &UserId, token_id: &str) -> Result<Session, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO auth_sessions (jti, user_id)
            VALUES ($1, $2)
            RETURNING jti, user_id, created_at, revoked_at
            "#,
        )
        .bind(token_id)
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::SessionConflict(token_id.to_string());
                }
            }
            AuthError::Database(e.to_string())
        })?;

        Self::row_to_session(&row)
    }

    async fn is_active(&self, token_id: &str) -> Result<bool, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT revoked_at IS NULL AS active
            FROM auth_sessions
            WHERE jti = $1
            "#,
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(r.try_get("active")?),
            None => Ok(false),
        }
    }

    async fn revoke(&self, token_id: &str) -> Result<bool, AuthError> {
        // Conditional update: the WHERE clause makes the transition atomic,
        // so concurrent revocations of the same jti cannot both succeed.
        let result = sqlx::query(
            r#"
            UPDATE auth_sessions
            SET revoked_at = NOW()
            WHERE jti = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
