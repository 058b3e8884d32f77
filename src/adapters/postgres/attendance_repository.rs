//! PostgreSQL implementation of the attendance repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{AttendanceId, DomainError, TrainingId, UserId};
use crate::ports::{AttendanceRecord, AttendanceRepository, AttendanceScope};

pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: Uuid,
    session_id: Uuid,
    session_title: String,
    student_id: Uuid,
    student_name: Option<String>,
    status: String,
    scanned_at: DateTime<Utc>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord {
            id: AttendanceId::from_uuid(row.id),
            session_id: TrainingId::from_uuid(row.session_id),
            session_title: row.session_title,
            student_id: UserId::from_uuid(row.student_id),
            student_name: row.student_name,
            status: row.status,
            scanned_at: row.scanned_at,
        }
    }
}

const ATTENDANCE_SELECT: &str = r#"
    SELECT
        a.id,
        a.session_id,
        s.title AS session_title,
        a.student_id,
        p.full_name AS student_name,
        a.status,
        a.scanned_at
    FROM attendance a
    JOIN sessions s ON s.id = a.session_id
    JOIN profiles p ON p.id = a.student_id
"#;

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn list(
        &self,
        scope: AttendanceScope,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        let rows = match scope {
            AttendanceScope::All => {
                sqlx::query_as::<_, AttendanceRow>(&format!(
                    "{ATTENDANCE_SELECT} ORDER BY a.scanned_at DESC LIMIT $1"
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            AttendanceScope::StaffOf(user_id) => {
                sqlx::query_as::<_, AttendanceRow>(&format!(
                    r#"{ATTENDANCE_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = s.club_id
                     AND m.user_id = $1
                     AND m.role IN ('admin', 'coach')
                    ORDER BY a.scanned_at DESC
                    LIMIT $2"#
                ))
                .bind(user_id.as_uuid())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            AttendanceScope::SelfOnly(user_id) => {
                sqlx::query_as::<_, AttendanceRow>(&format!(
                    r#"{ATTENDANCE_SELECT}
                    WHERE a.student_id = $1
                    ORDER BY a.scanned_at DESC
                    LIMIT $2"#
                ))
                .bind(user_id.as_uuid())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list attendance", e))?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn list_for_session(
        &self,
        session_id: TrainingId,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{ATTENDANCE_SELECT} WHERE a.session_id = $1 ORDER BY a.scanned_at DESC"
        ))
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list session attendance", e))?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn check_in(
        &self,
        session_id: TrainingId,
        student_id: UserId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, session_id, student_id, status)
            VALUES ($1, $2, $3, 'present')
            ON CONFLICT (session_id, student_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id.as_uuid())
        .bind(student_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("record check-in", e))?;
        Ok(())
    }
}
