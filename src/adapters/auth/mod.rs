//! Password hashing adapter backed by argon2.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Argon2id with library defaults. Hashing runs on the blocking pool so
/// the executor is not stalled by the memory-hard work.
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2::PasswordHasher::hash_password(
                &Argon2::default(),
                password.as_bytes(),
                &salt,
            )
            .map(|hash| hash.to_string())
            .map_err(|err| {
                DomainError::new(ErrorCode::InternalError, format!("password hash: {err}"))
            })
        })
        .await
        .map_err(|err| DomainError::new(ErrorCode::InternalError, format!("join: {err}")))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash).map_err(|err| {
                DomainError::new(ErrorCode::InternalError, format!("stored hash: {err}"))
            })?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|err| DomainError::new(ErrorCode::InternalError, format!("join: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify_round_trip() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse").await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("battery staple", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash("secret").await.unwrap();
        let b = hasher.hash("secret").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = Argon2PasswordHasher::new();
        let err = hasher.verify("secret", "not-a-phc-string").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
