use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttendanceId, TrainingId, UserId};
use crate::ports::AttendanceRecord;

pub const DEFAULT_LIMIT: i64 = 25;
pub const MIN_LIMIT: i64 = 5;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListQuery {
    /// The effective page size, clamped to the allowed window.
    pub fn clamped_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    pub id: AttendanceId,
    pub status: String,
    pub scanned_at: DateTime<Utc>,
    pub session_title: String,
    pub student_name: Option<String>,
    pub student_id: UserId,
}

impl From<AttendanceRecord> for AttendanceRow {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            scanned_at: record.scanned_at,
            session_title: record.session_title,
            student_name: record.student_name,
            student_id: record.student_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceListResponse {
    pub attendance: Vec<AttendanceRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub ok: bool,
    pub session_id: TrainingId,
}
