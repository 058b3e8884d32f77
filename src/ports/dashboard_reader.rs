//! Live dashboard read port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::ClubScope;
use crate::domain::foundation::DomainError;
use crate::domain::wallet::TransactionReason;

/// A recent check-in for the dashboard feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCheckIn {
    pub student_name: Option<String>,
    pub session_title: String,
    pub scanned_at: DateTime<Utc>,
    pub status: String,
}

/// A recent wallet movement for the dashboard feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentMovement {
    pub amount: Decimal,
    pub reason: TransactionReason,
    pub club_name: String,
}

/// Everything the live dashboard renders in one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub student_count: i64,
    pub sessions_last_7_days: i64,
    pub wallets_total: Decimal,
    pub recent_attendance: Vec<RecentCheckIn>,
    pub recent_movements: Vec<RecentMovement>,
}

#[async_trait]
pub trait DashboardReader: Send + Sync {
    /// Snapshot scoped by the caller's memberships; superadmin sees all.
    async fn snapshot(&self, scope: ClubScope) -> Result<DashboardSnapshot, DomainError>;
}
