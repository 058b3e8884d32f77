//! PostgreSQL implementation of the join request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, parse_join_status, violates_constraint};
use crate::domain::foundation::{ClubId, DomainError, ErrorCode, JoinRequestId, UserId};
use crate::domain::join_request::{JoinRequest, JoinRequestStatus};
use crate::ports::{ClubScope, JoinRequestRepository};

pub struct PostgresJoinRequestRepository {
    pool: PgPool,
}

impl PostgresJoinRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JoinRequestRow {
    id: Uuid,
    club_id: Uuid,
    club_name: String,
    user_id: Uuid,
    user_email: String,
    user_full_name: Option<String>,
    status: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<JoinRequestRow> for JoinRequest {
    type Error = DomainError;

    fn try_from(row: JoinRequestRow) -> Result<Self, Self::Error> {
        Ok(JoinRequest {
            id: JoinRequestId::from_uuid(row.id),
            club_id: ClubId::from_uuid(row.club_id),
            club_name: row.club_name,
            user_id: UserId::from_uuid(row.user_id),
            user_email: row.user_email,
            user_full_name: row.user_full_name,
            status: parse_join_status(&row.status)?,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

const JOIN_REQUEST_SELECT: &str = r#"
    SELECT
        r.id,
        r.club_id,
        c.name AS club_name,
        r.user_id,
        p.email AS user_email,
        p.full_name AS user_full_name,
        r.status,
        r.note,
        r.created_at
    FROM club_join_requests r
    JOIN clubs c ON c.id = r.club_id
    JOIN profiles p ON p.id = r.user_id
"#;

#[async_trait]
impl JoinRequestRepository for PostgresJoinRequestRepository {
    async fn list(&self, scope: ClubScope) -> Result<Vec<JoinRequest>, DomainError> {
        let rows = match scope {
            ClubScope::All => {
                sqlx::query_as::<_, JoinRequestRow>(&format!(
                    "{JOIN_REQUEST_SELECT} ORDER BY r.created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query_as::<_, JoinRequestRow>(&format!(
                    r#"{JOIN_REQUEST_SELECT}
                    JOIN club_memberships admin
                      ON admin.club_id = r.club_id
                     AND admin.user_id = $1
                     AND admin.role = 'admin'
                    ORDER BY r.created_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::MemberOf(_) | ClubScope::StaffOf(_) => {
                return Err(DomainError::forbidden());
            }
        }
        .map_err(|e| db_error("list join requests", e))?;

        rows.into_iter().map(JoinRequest::try_from).collect()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<JoinRequest>, DomainError> {
        let rows = sqlx::query_as::<_, JoinRequestRow>(&format!(
            "{JOIN_REQUEST_SELECT} WHERE r.user_id = $1 ORDER BY r.created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list own join requests", e))?;

        rows.into_iter().map(JoinRequest::try_from).collect()
    }

    async fn find(&self, id: JoinRequestId) -> Result<Option<JoinRequest>, DomainError> {
        let row = sqlx::query_as::<_, JoinRequestRow>(&format!(
            "{JOIN_REQUEST_SELECT} WHERE r.id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find join request", e))?;

        row.map(JoinRequest::try_from).transpose()
    }

    async fn create(
        &self,
        club_id: ClubId,
        user_id: UserId,
        note: Option<&str>,
    ) -> Result<JoinRequest, DomainError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO club_join_requests (id, club_id, user_id, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "club_join_requests_club_id_fkey") {
                return DomainError::new(ErrorCode::ClubNotFound, "Club not found.");
            }
            db_error("create join request", e)
        })?;

        self.find(JoinRequestId::from_uuid(id))
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DatabaseError, "created join request vanished")
            })
    }

    async fn set_status(
        &self,
        id: JoinRequestId,
        status: JoinRequestStatus,
    ) -> Result<JoinRequest, DomainError> {
        let updated = sqlx::query(
            r#"
            UPDATE club_join_requests
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update join request status", e))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::JoinRequestNotFound,
                "Join request not found.",
            ));
        }

        self.find(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::JoinRequestNotFound, "Join request not found.")
        })
    }
}
