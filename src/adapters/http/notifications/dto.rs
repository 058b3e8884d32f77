use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::NotificationId;
use crate::domain::notification::Notification;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 5;
pub const MAX_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub unread: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ListQuery {
    pub fn clamped_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
    }

    /// Only the literal `"1"` switches the unread filter on.
    pub fn unread_only(&self) -> bool {
        self.unread.as_deref() == Some("1")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            created_at: notification.created_at,
            read_at: notification.read_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    #[serde(default)]
    pub ids: Option<Vec<NotificationId>>,
    #[serde(default)]
    pub all: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub updated: i64,
}
