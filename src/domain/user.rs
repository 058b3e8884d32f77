//! User profiles and login sessions.

use chrono::{DateTime, Utc};

use super::foundation::{SessionId, UserId};

/// A registered user. The password hash is deliberately not part of this
/// type; authentication flows fetch [`StoredCredentials`] separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_superadmin: bool,
    pub created_at: DateTime<Utc>,
}

/// Credential material for password verification.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// A login session row. The session id doubles as the opaque cookie value.
///
/// Expiry is lazy: expired rows are ignored at lookup, not actively swept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub id: SessionId,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl UserSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
