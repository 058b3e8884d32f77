//! PostgreSQL implementation of the training session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, violates_constraint};
use crate::domain::foundation::{ClubId, DomainError, ErrorCode, SportId, TrainingId, UserId};
use crate::domain::training::TrainingSession;
use crate::ports::{ClubScope, NewTrainingSession, TrainingRepository, TrainingUpdate};

pub struct PostgresTrainingRepository {
    pool: PgPool,
}

impl PostgresTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TrainingRow {
    id: Uuid,
    club_id: Uuid,
    club_name: String,
    sport_id: Uuid,
    sport_name: String,
    coach_id: Option<Uuid>,
    coach_name: Option<String>,
    title: String,
    starts_at: DateTime<Utc>,
    location: Option<String>,
    capacity: Option<i32>,
    qr_token: String,
    created_at: DateTime<Utc>,
}

impl From<TrainingRow> for TrainingSession {
    fn from(row: TrainingRow) -> Self {
        TrainingSession {
            id: TrainingId::from_uuid(row.id),
            club_id: ClubId::from_uuid(row.club_id),
            club_name: row.club_name,
            sport_id: SportId::from_uuid(row.sport_id),
            sport_name: row.sport_name,
            coach_id: row.coach_id.map(UserId::from_uuid),
            coach_name: row.coach_name,
            title: row.title,
            starts_at: row.starts_at,
            location: row.location,
            capacity: row.capacity,
            qr_token: row.qr_token,
            created_at: row.created_at,
        }
    }
}

const TRAINING_SELECT: &str = r#"
    SELECT
        t.id,
        t.club_id,
        c.name AS club_name,
        t.sport_id,
        sp.name AS sport_name,
        t.coach_id,
        p.full_name AS coach_name,
        t.title,
        t.starts_at,
        t.location,
        t.capacity,
        t.qr_token,
        t.created_at
    FROM sessions t
    JOIN clubs c ON c.id = t.club_id
    JOIN sports sp ON sp.id = t.sport_id
    LEFT JOIN profiles p ON p.id = t.coach_id
"#;

#[async_trait]
impl TrainingRepository for PostgresTrainingRepository {
    async fn list(&self, scope: ClubScope) -> Result<Vec<TrainingSession>, DomainError> {
        let rows = match scope {
            ClubScope::All => {
                sqlx::query_as::<_, TrainingRow>(&format!(
                    "{TRAINING_SELECT} ORDER BY t.starts_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::StaffOf(user_id) => {
                sqlx::query_as::<_, TrainingRow>(&format!(
                    r#"{TRAINING_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = t.club_id
                     AND m.user_id = $1
                     AND m.role IN ('admin', 'coach')
                    ORDER BY t.starts_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query_as::<_, TrainingRow>(&format!(
                    r#"{TRAINING_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = t.club_id
                     AND m.user_id = $1
                     AND m.role = 'admin'
                    ORDER BY t.starts_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::MemberOf(user_id) => {
                sqlx::query_as::<_, TrainingRow>(&format!(
                    r#"{TRAINING_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = t.club_id
                     AND m.user_id = $1
                    ORDER BY t.starts_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list training sessions", e))?;

        Ok(rows.into_iter().map(TrainingSession::from).collect())
    }

    async fn find(&self, id: TrainingId) -> Result<Option<TrainingSession>, DomainError> {
        let row = sqlx::query_as::<_, TrainingRow>(&format!("{TRAINING_SELECT} WHERE t.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find training session", e))?;
        Ok(row.map(TrainingSession::from))
    }

    async fn find_by_qr_token(
        &self,
        token: &str,
    ) -> Result<Option<TrainingSession>, DomainError> {
        let row = sqlx::query_as::<_, TrainingRow>(&format!(
            "{TRAINING_SELECT} WHERE t.qr_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("resolve qr token", e))?;
        Ok(row.map(TrainingSession::from))
    }

    async fn create(&self, session: NewTrainingSession) -> Result<TrainingSession, DomainError> {
        // The sport is derived from the owning club inside the insert, so
        // a club move can never leave a session pointing at a stale sport.
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO sessions (id, club_id, sport_id, coach_id, title, starts_at, location, capacity, qr_token)
            SELECT $1, c.id, c.sport_id, $3, $4, $5, $6, $7, $8
            FROM clubs c
            WHERE c.id = $2
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.club_id.as_uuid())
        .bind(session.coach_id.map(|c| *c.as_uuid()))
        .bind(&session.title)
        .bind(session.starts_at)
        .bind(&session.location)
        .bind(session.capacity)
        .bind(&session.qr_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "sessions_qr_token_key") {
                return DomainError::new(ErrorCode::Conflict, "QR token collision.");
            }
            db_error("create training session", e)
        })?;

        let (id,) =
            row.ok_or_else(|| DomainError::new(ErrorCode::ClubNotFound, "Club not found."))?;

        self.find(TrainingId::from_uuid(id)).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, "created session vanished")
        })
    }

    async fn update(
        &self,
        id: TrainingId,
        update: TrainingUpdate,
    ) -> Result<TrainingSession, DomainError> {
        // Two-level Option: outer None leaves the column alone, inner
        // None clears it.
        let updated = sqlx::query(
            r#"
            UPDATE sessions
            SET title = coalesce($2, title),
                starts_at = coalesce($3, starts_at),
                location = CASE WHEN $4 THEN $5 ELSE location END,
                capacity = CASE WHEN $6 THEN $7 ELSE capacity END
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.title)
        .bind(update.starts_at)
        .bind(update.location.is_some())
        .bind(update.location.flatten())
        .bind(update.capacity.is_some())
        .bind(update.capacity.flatten())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update training session", e))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TrainingNotFound,
                "Session not found.",
            ));
        }

        self.find(id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::TrainingNotFound, "Session not found."))
    }

    async fn delete(&self, id: TrainingId) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete training session", e))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TrainingNotFound,
                "Session not found.",
            ));
        }
        Ok(())
    }
}
