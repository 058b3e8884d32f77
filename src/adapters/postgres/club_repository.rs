//! PostgreSQL implementation of the club repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, violates_constraint};
use crate::domain::club::Club;
use crate::domain::foundation::{ClubId, DomainError, ErrorCode, SportId, UserId};
use crate::ports::{ClubRepository, ClubScope, ClubUpdate};

pub struct PostgresClubRepository {
    pool: PgPool,
}

impl PostgresClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClubRow {
    id: Uuid,
    name: String,
    sport_id: Uuid,
    sport_name: String,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<ClubRow> for Club {
    fn from(row: ClubRow) -> Self {
        Club {
            id: ClubId::from_uuid(row.id),
            name: row.name,
            sport_id: SportId::from_uuid(row.sport_id),
            sport_name: row.sport_name,
            created_by: row.created_by.map(UserId::from_uuid),
            created_at: row.created_at,
        }
    }
}

const CLUB_SELECT: &str = r#"
    SELECT
        c.id,
        c.name,
        c.sport_id,
        s.name AS sport_name,
        c.created_by,
        c.created_at
    FROM clubs c
    JOIN sports s ON s.id = c.sport_id
"#;

#[async_trait]
impl ClubRepository for PostgresClubRepository {
    async fn list(&self, scope: ClubScope) -> Result<Vec<Club>, DomainError> {
        let rows = match scope {
            ClubScope::All => {
                sqlx::query_as::<_, ClubRow>(&format!("{CLUB_SELECT} ORDER BY c.name"))
                    .fetch_all(&self.pool)
                    .await
            }
            ClubScope::StaffOf(user_id) => {
                sqlx::query_as::<_, ClubRow>(&format!(
                    r#"{CLUB_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = c.id
                     AND m.user_id = $1
                     AND m.role IN ('admin', 'coach')
                    ORDER BY c.name"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query_as::<_, ClubRow>(&format!(
                    r#"{CLUB_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = c.id
                     AND m.user_id = $1
                     AND m.role = 'admin'
                    ORDER BY c.name"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::MemberOf(user_id) => {
                sqlx::query_as::<_, ClubRow>(&format!(
                    r#"{CLUB_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = c.id
                     AND m.user_id = $1
                    ORDER BY c.name"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list clubs", e))?;

        Ok(rows.into_iter().map(Club::from).collect())
    }

    async fn catalog(&self) -> Result<Vec<Club>, DomainError> {
        let rows = sqlx::query_as::<_, ClubRow>(&format!("{CLUB_SELECT} ORDER BY c.name"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("club catalog", e))?;
        Ok(rows.into_iter().map(Club::from).collect())
    }

    async fn find(&self, id: ClubId) -> Result<Option<Club>, DomainError> {
        let row = sqlx::query_as::<_, ClubRow>(&format!("{CLUB_SELECT} WHERE c.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find club", e))?;
        Ok(row.map(Club::from))
    }

    async fn create(
        &self,
        name: &str,
        sport_id: SportId,
        created_by: UserId,
    ) -> Result<Club, DomainError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO clubs (id, name, sport_id, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(sport_id.as_uuid())
        .bind(created_by.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "clubs_sport_id_fkey") {
                return DomainError::new(ErrorCode::SportNotFound, "Sport not found.");
            }
            db_error("create club", e)
        })?;

        self.find(ClubId::from_uuid(id))
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::DatabaseError, "created club vanished"))
    }

    async fn update(&self, id: ClubId, update: ClubUpdate) -> Result<Club, DomainError> {
        let updated = sqlx::query(
            r#"
            UPDATE clubs
            SET name = coalesce($2, name),
                sport_id = coalesce($3, sport_id)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.name)
        .bind(update.sport_id.map(|s| *s.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "clubs_sport_id_fkey") {
                return DomainError::new(ErrorCode::SportNotFound, "Sport not found.");
            }
            db_error("update club", e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClubNotFound, "Club not found."));
        }

        self.find(id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ClubNotFound, "Club not found."))
    }

    async fn delete(&self, id: ClubId) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete club", e))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClubNotFound, "Club not found."));
        }
        Ok(())
    }
}
