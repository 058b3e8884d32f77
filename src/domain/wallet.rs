//! Student wallets and their append-only transaction ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

use super::foundation::{ClubId, TransactionId, UserId, WalletId};

/// Why a wallet transaction was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionReason {
    /// Manual credit by an admin.
    Topup,
    /// Manual correction, either sign.
    Adjustment,
    /// One-time registration fee debit.
    Registration,
    /// Recurring monthly fee debit.
    Monthly,
}

impl TransactionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionReason::Topup => "topup",
            TransactionReason::Adjustment => "adjustment",
            TransactionReason::Registration => "registration",
            TransactionReason::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "topup" => Some(TransactionReason::Topup),
            "adjustment" => Some(TransactionReason::Adjustment),
            "registration" => Some(TransactionReason::Registration),
            "monthly" => Some(TransactionReason::Monthly),
            _ => None,
        }
    }

    /// Reasons an admin may post by hand. Billing reasons are reserved
    /// for the billing run.
    pub fn is_manual(&self) -> bool {
        matches!(
            self,
            TransactionReason::Topup | TransactionReason::Adjustment
        )
    }
}

impl fmt::Display for TransactionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One wallet per (student, club) pair. The balance is the maintained
/// sum of the ledger; it is never written except alongside a transaction
/// insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub id: WalletId,
    pub club_id: ClubId,
    pub club_name: String,
    pub student_id: UserId,
    pub student_email: String,
    pub student_name: Option<String>,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// One ledger entry. Amounts are signed: credits positive, debits negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletTransaction {
    pub id: TransactionId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub reason: TransactionReason,
    pub note: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
