//! Training sessions and attendance.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use super::foundation::{AttendanceId, ClubId, SportId, TrainingId, UserId};

/// Length of the opaque QR check-in token.
const QR_TOKEN_LEN: usize = 32;

/// A scheduled training session, denormalized with the names handlers
/// render alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSession {
    pub id: TrainingId,
    pub club_id: ClubId,
    pub club_name: String,
    pub sport_id: SportId,
    pub sport_name: String,
    pub coach_id: Option<UserId>,
    pub coach_name: Option<String>,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub qr_token: String,
    pub created_at: DateTime<Utc>,
}

/// One attendance row. Uniqueness per (session, student) is enforced by
/// the database, which makes QR check-in idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub id: AttendanceId,
    pub session_id: TrainingId,
    pub student_id: UserId,
    pub status: String,
    pub scanned_at: DateTime<Utc>,
}

/// Generates a fresh QR check-in token for a new training session.
pub fn generate_qr_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(QR_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_tokens_are_alphanumeric_and_fixed_length() {
        let token = generate_qr_token();
        assert_eq!(token.len(), QR_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn qr_tokens_differ_across_calls() {
        assert_ne!(generate_qr_token(), generate_qr_token());
    }
}
