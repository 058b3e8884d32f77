//! Ports: contracts between the domain and the outside world.
//!
//! Following hexagonal architecture, every persistence and crypto concern
//! is a trait here; the adapters implement them and the application and
//! HTTP layers depend only on the traits.

mod attendance_repository;
mod billing_runner;
mod club_repository;
mod dashboard_reader;
mod join_request_repository;
mod membership_repository;
mod notification_repository;
mod password_hasher;
mod profile_reader;
mod reports_reader;
mod session_store;
mod settings_repository;
mod sport_repository;
mod training_repository;
mod user_repository;
mod wallet_repository;

pub use attendance_repository::{AttendanceRecord, AttendanceRepository, AttendanceScope};
pub use billing_runner::BillingRunner;
pub use club_repository::{ClubRepository, ClubUpdate};
pub use dashboard_reader::{DashboardReader, DashboardSnapshot, RecentCheckIn, RecentMovement};
pub use join_request_repository::JoinRequestRepository;
pub use membership_repository::MembershipRepository;
pub use notification_repository::{NotificationFilter, NotificationPage, NotificationRepository};
pub use password_hasher::PasswordHasher;
pub use profile_reader::{AttendanceSummary, ProfileOverview, ProfileReader, ProfileWallet};
pub use reports_reader::{ExportRow, ReportOverview, ReportsReader, TrendRow, Trends};
pub use session_store::SessionStore;
pub use settings_repository::SettingsRepository;
pub use sport_repository::{SportRepository, SportWithClubCount};
pub use training_repository::{NewTrainingSession, TrainingRepository, TrainingUpdate};
pub use user_repository::{NewUser, UserRepository};
pub use wallet_repository::{TransactionRecord, WalletRepository};

use crate::domain::foundation::UserId;

/// How a read should be scoped by club membership.
///
/// Superadmins see everything; everyone else is restricted to clubs where
/// they hold a qualifying membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubScope {
    /// No restriction (superadmin).
    All,
    /// Clubs where the user holds any membership.
    MemberOf(UserId),
    /// Clubs where the user is admin or coach.
    StaffOf(UserId),
    /// Clubs where the user is admin.
    AdminOf(UserId),
}
