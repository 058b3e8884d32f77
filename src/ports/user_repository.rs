//! User profile persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Profile, StoredCredentials};

/// Fields for creating a user at signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a profile.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` when the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: NewUser) -> Result<Profile, DomainError>;

    /// Looks a user up by email for login. Returns the profile together
    /// with the stored hash so the caller can verify without a second
    /// round-trip.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Profile, StoredCredentials)>, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, DomainError>;

    /// Idempotently provisions the bootstrap superadmin account: creates
    /// it if the email is unknown, otherwise flips `is_superadmin` on.
    async fn ensure_superadmin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), DomainError>;
}
