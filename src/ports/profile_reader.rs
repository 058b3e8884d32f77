//! Profile overview read port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::foundation::{DomainError, UserId, WalletId};
use crate::domain::user::Profile;

/// A wallet as shown on the caller's own profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWallet {
    pub id: WalletId,
    pub balance: Decimal,
    pub club_name: String,
    pub sport_name: String,
}

/// The caller's attendance history in aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total: i64,
    pub recent: i64,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Everything the profile page renders in one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOverview {
    pub profile: Profile,
    pub wallets: Vec<ProfileWallet>,
    pub attendance: AttendanceSummary,
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// # Errors
    ///
    /// - `UserNotFound` when the profile row is missing
    async fn overview(&self, user_id: UserId) -> Result<ProfileOverview, DomainError>;
}
