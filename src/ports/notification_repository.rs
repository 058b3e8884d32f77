//! Notification persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

/// Listing filter. `limit` is already clamped by the caller.
#[derive(Debug, Clone)]
pub struct NotificationFilter {
    pub limit: i64,
    pub unread_only: bool,
    pub kind: Option<String>,
}

/// One page of notifications with the user's total unread count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// The user's notifications, newest first, plus their unread count.
    async fn list(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> Result<NotificationPage, DomainError>;

    /// Marks the given notifications read, scoped to the user so one
    /// caller cannot touch another's rows. Returns the updated count.
    async fn mark_read(
        &self,
        user_id: UserId,
        ids: &[NotificationId],
    ) -> Result<i64, DomainError>;

    /// Marks all of the user's unread notifications read. Returns the
    /// updated count.
    async fn mark_all_read(&self, user_id: UserId) -> Result<i64, DomainError>;
}
