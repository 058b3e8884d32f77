//! PostgreSQL implementation of the profile overview reader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DomainError, ErrorCode, UserId, WalletId};
use crate::domain::user::Profile;
use crate::ports::{AttendanceSummary, ProfileOverview, ProfileReader, ProfileWallet};

pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
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

#[derive(Debug, sqlx::FromRow)]
struct ProfileWalletRow {
    id: Uuid,
    balance: Decimal,
    club_name: String,
    sport_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceSummaryRow {
    total: i64,
    recent: i64,
    last_seen: Option<DateTime<Utc>>,
}

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn overview(&self, user_id: UserId) -> Result<ProfileOverview, DomainError> {
        let profile = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, full_name, phone, is_superadmin, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("load profile", e))?
        .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found."))?;

        let wallet_rows = sqlx::query_as::<_, ProfileWalletRow>(
            r#"
            SELECT
                w.id,
                w.balance,
                c.name AS club_name,
                sp.name AS sport_name
            FROM wallets w
            JOIN clubs c ON c.id = w.club_id
            JOIN sports sp ON sp.id = c.sport_id
            WHERE w.student_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("load profile wallets", e))?;

        let summary = sqlx::query_as::<_, AttendanceSummaryRow>(
            r#"
            SELECT
                count(*) AS total,
                count(*) FILTER (
                    WHERE scanned_at >= now() - interval '30 days'
                ) AS recent,
                max(scanned_at) AS last_seen
            FROM attendance
            WHERE student_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("summarize attendance", e))?;

        Ok(ProfileOverview {
            profile: Profile {
                id: UserId::from_uuid(profile.id),
                email: profile.email,
                full_name: profile.full_name,
                phone: profile.phone,
                is_superadmin: profile.is_superadmin,
                created_at: profile.created_at,
            },
            wallets: wallet_rows
                .into_iter()
                .map(|row| ProfileWallet {
                    id: WalletId::from_uuid(row.id),
                    balance: row.balance,
                    club_name: row.club_name,
                    sport_name: row.sport_name,
                })
                .collect(),
            attendance: AttendanceSummary {
                total: summary.total,
                recent: summary.recent,
                last_seen: summary.last_seen,
            },
        })
    }
}
