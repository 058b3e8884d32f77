//! Attendance persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::{AttendanceId, DomainError, TrainingId, UserId};

/// Who an attendance listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceScope {
    /// Every row (superadmin).
    All,
    /// Rows in clubs where the user is admin or coach.
    StaffOf(UserId),
    /// The student's own rows.
    SelfOnly(UserId),
}

/// One attendance row denormalized for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub session_id: TrainingId,
    pub session_title: String,
    pub student_id: UserId,
    pub student_name: Option<String>,
    pub status: String,
    pub scanned_at: DateTime<Utc>,
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Latest rows under the scope, newest first, at most `limit`.
    async fn list(
        &self,
        scope: AttendanceScope,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;

    /// Rows for one training session, newest first.
    async fn list_for_session(
        &self,
        session_id: TrainingId,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;

    /// Records a check-in with `status = 'present'`. Idempotent per
    /// (session, student); the unique constraint absorbs repeats.
    async fn check_in(
        &self,
        session_id: TrainingId,
        student_id: UserId,
    ) -> Result<(), DomainError>;
}
