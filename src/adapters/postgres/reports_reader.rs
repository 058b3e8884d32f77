//! PostgreSQL implementation of the reports reader.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DomainError, TrainingId, UserId};
use crate::ports::{ClubScope, ExportRow, ReportOverview, ReportsReader, TrendRow, Trends};

pub struct PostgresReportsReader {
    pool: PgPool,
}

impl PostgresReportsReader {
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
struct TrendDbRow {
    name: Option<String>,
    sessions: i64,
    attendance: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct ExportDbRow {
    id: Uuid,
    title: String,
    starts_at: DateTime<Utc>,
    club_name: String,
    sport_name: String,
    coach_name: Option<String>,
    attendance_count: i64,
}

#[async_trait]
impl ReportsReader for PostgresReportsReader {
    async fn overview(
        &self,
        scope: ClubScope,
        days: i64,
    ) -> Result<ReportOverview, DomainError> {
        let since = Utc::now() - Duration::days(days);
        let user = Self::scope_user(scope).map(|u| *u.as_uuid());

        // Any-membership scoping: a NULL user means unrestricted.
        let (sessions,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*)
            FROM sessions s
            WHERE s.starts_at >= $1
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships m
                  WHERE m.club_id = s.club_id AND m.user_id = $2
              ))
            "#,
        )
        .bind(since)
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count sessions", e))?;

        let (attendance,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*)
            FROM attendance a
            JOIN sessions s ON s.id = a.session_id
            WHERE a.scanned_at >= $1
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships m
                  WHERE m.club_id = s.club_id AND m.user_id = $2
              ))
            "#,
        )
        .bind(since)
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count attendance", e))?;

        let (wallets_total,): (Option<Decimal>,) = sqlx::query_as(
            r#"
            SELECT sum(w.balance)
            FROM wallets w
            WHERE ($1::uuid IS NULL OR EXISTS (
                SELECT 1 FROM club_memberships m
                WHERE m.club_id = w.club_id AND m.user_id = $1
            ))
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("sum wallet balances", e))?;

        let (clubs,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*)
            FROM clubs c
            WHERE ($1::uuid IS NULL OR EXISTS (
                SELECT 1 FROM club_memberships m
                WHERE m.club_id = c.id AND m.user_id = $1
            ))
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count clubs", e))?;

        Ok(ReportOverview {
            sessions,
            attendance,
            wallets_total: wallets_total.unwrap_or_default(),
            clubs,
        })
    }

    async fn trends(&self, scope: ClubScope, days: i64) -> Result<Trends, DomainError> {
        let since = Utc::now() - Duration::days(days);
        let admin = Self::scope_user(scope).map(|u| *u.as_uuid());

        let sport_rows = sqlx::query_as::<_, TrendDbRow>(
            r#"
            SELECT
                sp.name AS name,
                count(DISTINCT s.id) AS sessions,
                count(a.id) AS attendance
            FROM sessions s
            JOIN sports sp ON sp.id = s.sport_id
            LEFT JOIN attendance a ON a.session_id = s.id
            WHERE s.starts_at >= $1
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships m
                  WHERE m.club_id = s.club_id AND m.user_id = $2 AND m.role = 'admin'
              ))
            GROUP BY sp.name
            ORDER BY sessions DESC
            "#,
        )
        .bind(since)
        .bind(admin)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("trend by sport", e))?;

        let coach_rows = sqlx::query_as::<_, TrendDbRow>(
            r#"
            SELECT
                p.full_name AS name,
                count(DISTINCT s.id) AS sessions,
                count(a.id) AS attendance
            FROM sessions s
            LEFT JOIN profiles p ON p.id = s.coach_id
            LEFT JOIN attendance a ON a.session_id = s.id
            WHERE s.starts_at >= $1
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships m
                  WHERE m.club_id = s.club_id AND m.user_id = $2 AND m.role = 'admin'
              ))
            GROUP BY p.full_name
            ORDER BY sessions DESC
            "#,
        )
        .bind(since)
        .bind(admin)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("trend by coach", e))?;

        let by_sport = sport_rows
            .into_iter()
            .map(|row| TrendRow {
                name: row.name.unwrap_or_else(|| "Unknown".to_string()),
                sessions: row.sessions,
                attendance: row.attendance,
            })
            .collect();
        let by_coach = coach_rows
            .into_iter()
            .map(|row| TrendRow {
                name: row.name.unwrap_or_else(|| "Unassigned coach".to_string()),
                sessions: row.sessions,
                attendance: row.attendance,
            })
            .collect();

        Ok(Trends { by_sport, by_coach })
    }

    async fn export_rows(
        &self,
        scope: ClubScope,
        days: i64,
    ) -> Result<Vec<ExportRow>, DomainError> {
        let since = Utc::now() - Duration::days(days);
        let admin = Self::scope_user(scope).map(|u| *u.as_uuid());

        let rows = sqlx::query_as::<_, ExportDbRow>(
            r#"
            SELECT
                s.id,
                s.title,
                s.starts_at,
                c.name AS club_name,
                sp.name AS sport_name,
                p.full_name AS coach_name,
                count(a.id) AS attendance_count
            FROM sessions s
            JOIN clubs c ON c.id = s.club_id
            JOIN sports sp ON sp.id = s.sport_id
            LEFT JOIN profiles p ON p.id = s.coach_id
            LEFT JOIN attendance a ON a.session_id = s.id
            WHERE s.starts_at >= $1
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM club_memberships m
                  WHERE m.club_id = s.club_id AND m.user_id = $2 AND m.role = 'admin'
              ))
            GROUP BY s.id, c.name, sp.name, p.full_name
            ORDER BY s.starts_at DESC
            "#,
        )
        .bind(since)
        .bind(admin)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("export sessions", e))?;

        Ok(rows
            .into_iter()
            .map(|row| ExportRow {
                session_id: TrainingId::from_uuid(row.id),
                title: row.title,
                sport: row.sport_name,
                club: row.club_name,
                coach: row.coach_name,
                starts_at: row.starts_at,
                attendance_count: row.attendance_count,
            })
            .collect())
    }
}
