//! Foundation types shared across the domain.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode};
pub use ids::{
    AttendanceId, ClubId, JoinRequestId, MembershipId, NotificationId, SessionId, SportId,
    TrainingId, TransactionId, UserId, WalletId,
};
