//! Login session persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::user::{Profile, UserSession};

/// Port for the session-token to user mapping.
///
/// Lookup is the hot path of every authenticated request. Expiry is lazy:
/// `find_user` must treat an expired row the same as a missing one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session expiring at `expires_at`. The returned session id
    /// doubles as the opaque cookie value.
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSession, DomainError>;

    /// Resolves a session id to its user, requiring `expires_at > now()`.
    ///
    /// Returns `None` for missing, unknown, and expired sessions alike.
    async fn find_user(&self, session_id: SessionId) -> Result<Option<Profile>, DomainError>;

    /// Deletes a session (logout). Deleting an unknown id is not an error.
    async fn delete(&self, session_id: SessionId) -> Result<(), DomainError>;
}
