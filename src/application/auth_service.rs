//! Signup, login, and logout flows.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::user::{Profile, UserSession};
use crate::ports::{NewUser, PasswordHasher, SessionStore, UserRepository};

/// Normalizes an email the way the rest of the system stores it.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        session_ttl_days: i64,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            session_ttl: Duration::days(session_ttl_days),
        }
    }

    /// Registers a user and opens a session for them.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` when email or password is empty
    /// - `EmailTaken` when the email is already registered
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<(Profile, UserSession), DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Email and password are required."));
        }

        let password_hash = self.hasher.hash(password).await?;
        let profile = self
            .users
            .create(NewUser {
                email,
                password_hash,
                full_name: full_name
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from),
            })
            .await?;

        let session = self.open_session(&profile).await?;
        Ok((profile, session))
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown email and wrong password fail identically so the response
    /// leaks nothing about which part was wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Profile, UserSession), DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Email and password are required."));
        }

        let (profile, credentials) = match self.users.find_credentials(&email).await? {
            Some(found) => found,
            None => return Err(Self::invalid_credentials()),
        };

        if !self
            .hasher
            .verify(password, &credentials.password_hash)
            .await?
        {
            return Err(Self::invalid_credentials());
        }

        let session = self.open_session(&profile).await?;
        Ok((profile, session))
    }

    /// Deletes the session row. Unknown sessions log out successfully.
    pub async fn logout(&self, session_id: SessionId) -> Result<(), DomainError> {
        self.sessions.delete(session_id).await
    }

    /// Loads a profile by id, for the current-user endpoint.
    pub async fn profile_of(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        self.users.find_by_id(user_id).await
    }

    async fn open_session(&self, profile: &Profile) -> Result<UserSession, DomainError> {
        self.sessions
            .create(profile.id, Utc::now() + self.session_ttl)
            .await
    }

    fn invalid_credentials() -> DomainError {
        DomainError::new(
            crate::domain::foundation::ErrorCode::Unauthenticated,
            "Invalid email or password.",
        )
    }
}
