//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request errors
    ValidationFailed,
    Unauthenticated,
    Forbidden,

    // Not found errors
    UserNotFound,
    ClubNotFound,
    SportNotFound,
    TrainingNotFound,
    MembershipNotFound,
    WalletNotFound,
    JoinRequestNotFound,
    NotFound,

    // Conflict errors
    EmailTaken,
    Conflict,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::ClubNotFound => "CLUB_NOT_FOUND",
            ErrorCode::SportNotFound => "SPORT_NOT_FOUND",
            ErrorCode::TrainingNotFound => "TRAINING_NOT_FOUND",
            ErrorCode::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            ErrorCode::WalletNotFound => "WALLET_NOT_FOUND",
            ErrorCode::JoinRequestNotFound => "JOIN_REQUEST_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation (bad request) error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Creates an authentication-required error with the generic message.
    ///
    /// Never distinguishes missing, unknown, and expired sessions.
    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthenticated, "Unauthorized.")
    }

    /// Creates an authorization error with the generic message.
    pub fn forbidden() -> Self {
        Self::new(ErrorCode::Forbidden, "Forbidden.")
    }

    /// Creates a database error wrapping an underlying failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ClubNotFound, "Club not found.");
        assert_eq!(format!("{}", err), "[CLUB_NOT_FOUND] Club not found.");
    }

    #[test]
    fn unauthenticated_uses_generic_message() {
        let err = DomainError::unauthenticated();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
        assert_eq!(err.message, "Unauthorized.");
    }

    #[test]
    fn forbidden_uses_generic_message() {
        let err = DomainError::forbidden();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message, "Forbidden.");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::EmailTaken), "EMAIL_TAKEN");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
