//! The single HTTP error surface.
//!
//! Handlers return `Result<_, ApiError>`; every `DomainError` converts
//! into one and maps its code to a status here, so no handler hand-picks
//! status codes for domain failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body: `{"error": "...", "code": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: String,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        DomainError::unauthenticated().into()
    }

    pub fn forbidden() -> Self {
        DomainError::forbidden().into()
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::validation(message).into()
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound
        | ErrorCode::ClubNotFound
        | ErrorCode::SportNotFound
        | ErrorCode::TrainingNotFound
        | ErrorCode::MembershipNotFound
        | ErrorCode::WalletNotFound
        | ErrorCode::JoinRequestNotFound
        | ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::EmailTaken | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            status: status_for(err.code),
            code: err.code,
            message: err.message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        let body = ErrorBody {
            // Internal detail stays in the logs, not the response.
            error: if self.status.is_server_error() {
                "An unexpected error occurred.".to_string()
            } else {
                self.message
            },
            code: self.code.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}
