//! Club join requests and their status lifecycle.

use chrono::{DateTime, Utc};
use std::fmt;

use super::foundation::{ClubId, JoinRequestId, UserId};

/// Status of a join request. Admins may move a request freely among the
/// three states; approval additionally creates a student membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinRequestStatus::Pending => "pending",
            JoinRequestStatus::Approved => "approved",
            JoinRequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(JoinRequestStatus::Pending),
            "approved" => Some(JoinRequestStatus::Approved),
            "rejected" => Some(JoinRequestStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for JoinRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A student's request to join a club, denormalized with display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub id: JoinRequestId,
    pub club_id: ClubId,
    pub club_name: String,
    pub user_id: UserId,
    pub user_email: String,
    pub user_full_name: Option<String>,
    pub status: JoinRequestStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
