//! PostgreSQL implementations of the persistence ports.
//!
//! Every adapter takes an injected `PgPool`. Scoped listings are built as
//! separate queries per scope rather than string-spliced filters, so every
//! statement stays fully parameterized.

mod attendance_repository;
mod billing_runner;
mod club_repository;
mod dashboard_reader;
mod join_request_repository;
mod membership_repository;
mod notification_repository;
mod profile_reader;
mod reports_reader;
mod session_store;
mod settings_repository;
mod sport_repository;
mod training_repository;
mod user_repository;
mod wallet_repository;

pub use attendance_repository::PostgresAttendanceRepository;
pub use billing_runner::PostgresBillingRunner;
pub use club_repository::PostgresClubRepository;
pub use dashboard_reader::PostgresDashboardReader;
pub use join_request_repository::PostgresJoinRequestRepository;
pub use membership_repository::PostgresMembershipRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use profile_reader::PostgresProfileReader;
pub use reports_reader::PostgresReportsReader;
pub use session_store::PostgresSessionStore;
pub use settings_repository::PostgresSettingsRepository;
pub use sport_repository::PostgresSportRepository;
pub use training_repository::PostgresTrainingRepository;
pub use user_repository::PostgresUserRepository;
pub use wallet_repository::PostgresWalletRepository;

use crate::domain::access::ClubRole;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::join_request::JoinRequestStatus;
use crate::domain::wallet::TransactionReason;

pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {err}"))
}

pub(crate) fn parse_club_role(s: &str) -> Result<ClubRole, DomainError> {
    ClubRole::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("invalid membership role value: {s}"),
        )
    })
}

pub(crate) fn parse_reason(s: &str) -> Result<TransactionReason, DomainError> {
    TransactionReason::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("invalid transaction reason value: {s}"),
        )
    })
}

pub(crate) fn parse_join_status(s: &str) -> Result<JoinRequestStatus, DomainError> {
    JoinRequestStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("invalid join request status value: {s}"),
        )
    })
}

/// True when the error is a violation of the named constraint
/// (unique or foreign key).
pub(crate) fn violates_constraint(err: &sqlx::Error, constraint: &str) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.constraint() == Some(constraint);
    }
    false
}
