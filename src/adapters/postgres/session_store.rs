//! PostgreSQL implementation of the session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::user::{Profile, UserSession};
use crate::ports::SessionStore;

pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionUserRow {
    user_id: Uuid,
    email: String,
    full_name: Option<String>,
    phone: Option<String>,
    is_superadmin: bool,
    user_created_at: DateTime<Utc>,
}

impl From<SessionUserRow> for Profile {
    fn from(row: SessionUserRow) -> Self {
        Profile {
            id: UserId::from_uuid(row.user_id),
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            is_superadmin: row.is_superadmin,
            created_at: row.user_created_at,
        }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSession, DomainError> {
        let id = SessionId::new();
        sqlx::query(
            r#"
            INSERT INTO user_sessions (id, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("create session", e))?;

        Ok(UserSession {
            id,
            user_id,
            expires_at,
        })
    }

    async fn find_user(&self, session_id: SessionId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, SessionUserRow>(
            r#"
            SELECT
                p.id AS user_id,
                p.email,
                p.full_name,
                p.phone,
                p.is_superadmin,
                p.created_at AS user_created_at
            FROM user_sessions s
            JOIN profiles p ON p.id = s.user_id
            WHERE s.id = $1
              AND s.expires_at > now()
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("resolve session", e))?;

        Ok(row.map(Profile::from))
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete session", e))?;
        Ok(())
    }
}
