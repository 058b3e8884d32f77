use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ports::{DashboardSnapshot, RecentCheckIn, RecentMovement};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub students: i64,
    pub sessions: i64,
    pub wallets_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CheckInFeedItem {
    pub student: Option<String>,
    pub session: String,
    pub time: DateTime<Utc>,
    pub status: String,
}

impl From<RecentCheckIn> for CheckInFeedItem {
    fn from(item: RecentCheckIn) -> Self {
        Self {
            student: item.student_name,
            session: item.session_title,
            time: item.scanned_at,
            status: item.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovementFeedItem {
    pub amount: Decimal,
    pub reason: String,
    pub club: String,
}

impl From<RecentMovement> for MovementFeedItem {
    fn from(item: RecentMovement) -> Self {
        Self {
            amount: item.amount,
            reason: item.reason.as_str().to_string(),
            club: item.club_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveDashboardResponse {
    pub stats: DashboardStats,
    pub attendance: Vec<CheckInFeedItem>,
    pub wallet_moves: Vec<MovementFeedItem>,
}

impl From<DashboardSnapshot> for LiveDashboardResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        Self {
            stats: DashboardStats {
                students: snapshot.student_count,
                sessions: snapshot.sessions_last_7_days,
                wallets_total: snapshot.wallets_total,
            },
            attendance: snapshot
                .recent_attendance
                .into_iter()
                .map(CheckInFeedItem::from)
                .collect(),
            wallet_moves: snapshot
                .recent_movements
                .into_iter()
                .map(MovementFeedItem::from)
                .collect(),
        }
    }
}
