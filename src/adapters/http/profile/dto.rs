use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::access::{ClubAccess, Role};
use crate::domain::foundation::{UserId, WalletId};
use crate::domain::user::Profile;
use crate::ports::{AttendanceSummary, ProfileWallet};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUserResponse {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub is_superadmin: bool,
}

impl ProfileUserResponse {
    pub fn new(profile: Profile, role: Role) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            phone: profile.phone,
            role,
            is_superadmin: profile.is_superadmin,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileWalletResponse {
    pub id: WalletId,
    pub balance: Decimal,
    pub club_name: String,
    pub sport_name: String,
}

impl From<ProfileWallet> for ProfileWalletResponse {
    fn from(wallet: ProfileWallet) -> Self {
        Self {
            id: wallet.id,
            balance: wallet.balance,
            club_name: wallet.club_name,
            sport_name: wallet.sport_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummaryResponse {
    pub total: i64,
    pub recent: i64,
    pub last_seen: Option<DateTime<Utc>>,
}

impl From<AttendanceSummary> for AttendanceSummaryResponse {
    fn from(summary: AttendanceSummary) -> Self {
        Self {
            total: summary.total,
            recent: summary.recent,
            last_seen: summary.last_seen,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: ProfileUserResponse,
    pub clubs: Vec<ClubAccess>,
    pub wallets: Vec<ProfileWalletResponse>,
    pub attendance_summary: AttendanceSummaryResponse,
}
