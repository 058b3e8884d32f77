//! Reporting read port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ClubScope;
use crate::domain::foundation::{DomainError, TrainingId};

/// Headline counts for the reports overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOverview {
    pub sessions: i64,
    pub attendance: i64,
    pub wallets_total: Decimal,
    pub clubs: i64,
}

/// One aggregate row of the trends report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    pub name: String,
    pub sessions: i64,
    pub attendance: i64,
}

/// Session and attendance aggregates grouped by sport and by coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trends {
    pub by_sport: Vec<TrendRow>,
    pub by_coach: Vec<TrendRow>,
}

/// One row of the CSV export: a session with its attendance count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub session_id: TrainingId,
    pub title: String,
    pub sport: String,
    pub club: String,
    pub coach: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub attendance_count: i64,
}

#[async_trait]
pub trait ReportsReader: Send + Sync {
    /// Counts over the trailing `days` window, scoped by membership.
    /// Wallet totals and club counts ignore the window.
    async fn overview(&self, scope: ClubScope, days: i64)
        -> Result<ReportOverview, DomainError>;

    /// Aggregates over the trailing `days` window, ordered by session
    /// count descending. Coaches without a name group as one row with a
    /// `None` name.
    async fn trends(&self, scope: ClubScope, days: i64) -> Result<Trends, DomainError>;

    /// Per-session rows for the CSV export over the trailing window,
    /// newest first.
    async fn export_rows(
        &self,
        scope: ClubScope,
        days: i64,
    ) -> Result<Vec<ExportRow>, DomainError>;
}
