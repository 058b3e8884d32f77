//! User notifications.

use chrono::{DateTime, Utc};

use super::foundation::{ClubId, NotificationId, UserId};

/// One notification for a user. `dedupe_key` is unique when present, so
/// batch producers can insert with `on conflict do nothing` and never
/// double-notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub club_id: Option<ClubId>,
    pub kind: String,
    pub title: String,
    pub body: Option<String>,
    pub dedupe_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}
