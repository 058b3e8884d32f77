//! Password hashing port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for password hashing and verification.
///
/// Hashing is CPU-bound; implementations should move the work off the
/// async executor (e.g. `spawn_blocking`).
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verifies a candidate password against a stored hash. A malformed
    /// stored hash is an error, not a mismatch.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
