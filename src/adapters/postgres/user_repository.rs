//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, violates_constraint};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Profile, StoredCredentials};
use crate::ports::{NewUser, UserRepository};

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    full_name: Option<String>,
    phone: Option<String>,
    is_superadmin: bool,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: UserId::from_uuid(row.id),
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            is_superadmin: row.is_superadmin,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: Option<String>,
    phone: Option<String>,
    is_superadmin: bool,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<Profile, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, email, password_hash, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, full_name, phone, is_superadmin, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "profiles_email_key") {
                return DomainError::new(ErrorCode::EmailTaken, "Email already registered.");
            }
            db_error("create profile", e)
        })?;

        Ok(row.into())
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Profile, StoredCredentials)>, DomainError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT id, email, password_hash, full_name, phone, is_superadmin, created_at
            FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find credentials", e))?;

        Ok(row.map(|row| {
            let user_id = UserId::from_uuid(row.id);
            (
                Profile {
                    id: user_id,
                    email: row.email,
                    full_name: row.full_name,
                    phone: row.phone,
                    is_superadmin: row.is_superadmin,
                    created_at: row.created_at,
                },
                StoredCredentials {
                    user_id,
                    password_hash: row.password_hash,
                },
            )
        }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, full_name, phone, is_superadmin, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find profile", e))?;

        Ok(row.map(Profile::from))
    }

    async fn ensure_superadmin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, password_hash, is_superadmin)
            VALUES ($1, $2, $3, true)
            ON CONFLICT (email)
            DO UPDATE SET is_superadmin = true
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("ensure superadmin", e))?;
        Ok(())
    }
}
