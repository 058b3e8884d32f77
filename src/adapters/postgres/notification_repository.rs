//! PostgreSQL implementation of the notification repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{ClubId, DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::{NotificationFilter, NotificationPage, NotificationRepository};

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    club_id: Option<Uuid>,
    kind: String,
    title: String,
    body: Option<String>,
    dedupe_key: Option<String>,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            club_id: row.club_id.map(ClubId::from_uuid),
            kind: row.kind,
            title: row.title,
            body: row.body,
            dedupe_key: row.dedupe_key,
            created_at: row.created_at,
            read_at: row.read_at,
        }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn list(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> Result<NotificationPage, DomainError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, user_id, club_id, kind, title, body, dedupe_key, created_at, read_at
            FROM notifications
            WHERE user_id = $1
              AND ($2 = false OR read_at IS NULL)
              AND ($3::text IS NULL OR kind = $3)
            ORDER BY created_at DESC
            LIMIT $4
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(filter.unread_only)
        .bind(&filter.kind)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list notifications", e))?;

        let (unread_count,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*)
            FROM notifications
            WHERE user_id = $1 AND read_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count unread notifications", e))?;

        Ok(NotificationPage {
            notifications: rows.into_iter().map(Notification::from).collect(),
            unread_count,
        })
    }

    async fn mark_read(
        &self,
        user_id: UserId,
        ids: &[NotificationId],
    ) -> Result<i64, DomainError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read_at = now()
            WHERE user_id = $1
              AND id = ANY($2)
              AND read_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("mark notifications read", e))?;

        Ok(result.rows_affected() as i64)
    }

    async fn mark_all_read(&self, user_id: UserId) -> Result<i64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read_at = now()
            WHERE user_id = $1
              AND read_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("mark all notifications read", e))?;

        Ok(result.rows_affected() as i64)
    }
}
