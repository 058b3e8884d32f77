//! PostgreSQL implementation of the sport repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, violates_constraint};
use crate::domain::club::Sport;
use crate::domain::foundation::{DomainError, ErrorCode, SportId, UserId};
use crate::ports::{SportRepository, SportWithClubCount};

pub struct PostgresSportRepository {
    pool: PgPool,
}

impl PostgresSportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SportRow {
    id: Uuid,
    name: String,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<SportRow> for Sport {
    fn from(row: SportRow) -> Self {
        Sport {
            id: SportId::from_uuid(row.id),
            name: row.name,
            created_by: row.created_by.map(UserId::from_uuid),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SportCountRow {
    id: Uuid,
    name: String,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    club_count: i64,
}

#[async_trait]
impl SportRepository for PostgresSportRepository {
    async fn list(&self) -> Result<Vec<SportWithClubCount>, DomainError> {
        let rows = sqlx::query_as::<_, SportCountRow>(
            r#"
            SELECT
                s.id,
                s.name,
                s.created_by,
                s.created_at,
                count(c.id) AS club_count
            FROM sports s
            LEFT JOIN clubs c ON c.sport_id = s.id
            GROUP BY s.id, s.name, s.created_by, s.created_at
            ORDER BY s.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list sports", e))?;

        Ok(rows
            .into_iter()
            .map(|row| SportWithClubCount {
                sport: Sport {
                    id: SportId::from_uuid(row.id),
                    name: row.name,
                    created_by: row.created_by.map(UserId::from_uuid),
                    created_at: row.created_at,
                },
                club_count: row.club_count,
            })
            .collect())
    }

    async fn create(&self, name: &str, created_by: UserId) -> Result<Sport, DomainError> {
        let row = sqlx::query_as::<_, SportRow>(
            r#"
            INSERT INTO sports (id, name, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(created_by.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "sports_name_key") {
                return DomainError::new(ErrorCode::Conflict, "Sport already exists.");
            }
            db_error("create sport", e)
        })?;

        Ok(row.into())
    }

    async fn rename(&self, id: SportId, name: &str) -> Result<Sport, DomainError> {
        let row = sqlx::query_as::<_, SportRow>(
            r#"
            UPDATE sports
            SET name = $2
            WHERE id = $1
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "sports_name_key") {
                return DomainError::new(ErrorCode::Conflict, "Sport already exists.");
            }
            db_error("rename sport", e)
        })?;

        row.map(Sport::from)
            .ok_or_else(|| DomainError::new(ErrorCode::SportNotFound, "Sport not found."))
    }

    async fn delete(&self, id: SportId) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM sports WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if violates_constraint(&e, "clubs_sport_id_fkey") {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        "Sport still has clubs attached.",
                    );
                }
                db_error("delete sport", e)
            })?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SportNotFound, "Sport not found."));
        }
        Ok(())
    }
}
