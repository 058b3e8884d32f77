use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttendanceId, ClubId, SportId, TrainingId, UserId};
use crate::domain::training::TrainingSession;
use crate::ports::AttendanceRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub club_id: ClubId,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: TrainingId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub qr_token: String,
    pub club_id: ClubId,
    pub club_name: String,
    pub sport_id: SportId,
    pub sport_name: String,
}

impl From<TrainingSession> for SessionResponse {
    fn from(s: TrainingSession) -> Self {
        Self {
            id: s.id,
            title: s.title,
            starts_at: s.starts_at,
            location: s.location,
            capacity: s.capacity,
            qr_token: s.qr_token,
            club_id: s.club_id,
            club_name: s.club_name,
            sport_id: s.sport_id,
            sport_name: s.sport_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionResponse>,
}

#[derive(Debug, Serialize)]
pub struct SingleSessionResponse {
    pub session: SessionResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    pub session_id: TrainingId,
}

/// Minimal summary handed back to the QR scanner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: TrainingId,
    pub title: String,
    pub club_name: String,
    pub sport_name: String,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub session: SessionSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttendanceRow {
    pub id: AttendanceId,
    pub status: String,
    pub scanned_at: DateTime<Utc>,
    pub student_id: UserId,
    pub student_name: Option<String>,
}

impl From<AttendanceRecord> for SessionAttendanceRow {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            scanned_at: record.scanned_at,
            student_id: record.student_id,
            student_name: record.student_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionAttendanceResponse {
    pub attendance: Vec<SessionAttendanceRow>,
}
