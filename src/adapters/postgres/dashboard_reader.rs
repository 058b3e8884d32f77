//! PostgreSQL implementation of the live dashboard reader.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{db_error, parse_reason};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{
    ClubScope, DashboardReader, DashboardSnapshot, RecentCheckIn, RecentMovement,
};

const FEED_LIMIT: i64 = 4;

pub struct PostgresDashboardReader {
    pool: PgPool,
}

impl PostgresDashboardReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn scope_user(scope: ClubScope) -> Option<UserId> {
        match scope {
            ClubScope::All => None,
            ClubScope::MemberOf(user_id)
            | ClubScope::StaffOf(user_id)
            | ClubScope::AdminOf(user_id) => Some(user_id),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CheckInRow {
    student_name: Option<String>,
    session_title: String,
    scanned_at: DateTime<Utc>,
    status: String,
}

#[derive(Debug, sqlx::FromRow)]
struct MovementRow {
    amount: Decimal,
    reason: String,
    club_name: String,
}

#[async_trait]
impl DashboardReader for PostgresDashboardReader {
    async fn snapshot(&self, scope: ClubScope) -> Result<DashboardSnapshot, DomainError> {
        let since = Utc::now() - Duration::days(7);
        let user = Self::scope_user(scope).map(|u| *u.as_uuid());

        let (student_count,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(DISTINCT cm.user_id)
            FROM club_memberships cm
            WHERE cm.role = 'student'
              AND ($1::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships acc
                  WHERE acc.club_id = cm.club_id AND acc.user_id = $1
              ))
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count students", e))?;

        let (sessions_last_7_days,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*)
            FROM sessions s
            WHERE s.starts_at >= $1
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships acc
                  WHERE acc.club_id = s.club_id AND acc.user_id = $2
              ))
            "#,
        )
        .bind(since)
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count recent sessions", e))?;

        let (wallets_total,): (Option<Decimal>,) = sqlx::query_as(
            r#"
            SELECT sum(w.balance)
            FROM wallets w
            WHERE ($1::uuid IS NULL OR EXISTS (
                SELECT 1 FROM club_memberships acc
                WHERE acc.club_id = w.club_id AND acc.user_id = $1
            ))
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("sum wallet balances", e))?;

        let check_in_rows = sqlx::query_as::<_, CheckInRow>(
            r#"
            SELECT
                p.full_name AS student_name,
                s.title AS session_title,
                a.scanned_at,
                a.status
            FROM attendance a
            JOIN sessions s ON s.id = a.session_id
            JOIN profiles p ON p.id = a.student_id
            WHERE ($1::uuid IS NULL OR EXISTS (
                SELECT 1 FROM club_memberships acc
                WHERE acc.club_id = s.club_id AND acc.user_id = $1
            ))
            ORDER BY a.scanned_at DESC
            LIMIT $2
            "#,
        )
        .bind(user)
        .bind(FEED_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("recent check-ins", e))?;

        let movement_rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT
                t.amount,
                t.reason,
                c.name AS club_name
            FROM wallet_transactions t
            JOIN wallets w ON w.id = t.wallet_id
            JOIN clubs c ON c.id = w.club_id
            WHERE ($1::uuid IS NULL OR EXISTS (
                SELECT 1 FROM club_memberships acc
                WHERE acc.club_id = w.club_id AND acc.user_id = $1
            ))
            ORDER BY t.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user)
        .bind(FEED_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("recent wallet movements", e))?;

        let recent_movements = movement_rows
            .into_iter()
            .map(|row| {
                Ok(RecentMovement {
                    amount: row.amount,
                    reason: parse_reason(&row.reason)?,
                    club_name: row.club_name,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(DashboardSnapshot {
            student_count,
            sessions_last_7_days,
            wallets_total: wallets_total.unwrap_or_default(),
            recent_attendance: check_in_rows
                .into_iter()
                .map(|row| RecentCheckIn {
                    student_name: row.student_name,
                    session_title: row.session_title,
                    scanned_at: row.scanned_at,
                    status: row.status,
                })
                .collect(),
            recent_movements,
        })
    }
}
