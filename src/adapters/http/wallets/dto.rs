use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClubId, TransactionId, UserId, WalletId};
use crate::domain::wallet::Wallet;
use crate::ports::TransactionRecord;

pub const TRANSACTIONS_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub id: WalletId,
    pub balance: Decimal,
    pub club_id: ClubId,
    pub club_name: String,
    pub student_id: UserId,
    pub student_name: Option<String>,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            balance: wallet.balance,
            club_id: wallet.club_id,
            club_name: wallet.club_name,
            student_id: wallet.student_id,
            student_name: wallet.student_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WalletListResponse {
    pub wallets: Vec<WalletResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub amount: Decimal,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub wallet_id: WalletId,
    pub club_name: String,
    pub student_name: Option<String>,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            reason: record.reason.as_str().to_string(),
            created_at: record.created_at,
            wallet_id: record.wallet_id,
            club_name: record.club_name,
            student_name: record.student_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTransactionRequest {
    pub wallet_id: Option<WalletId>,
    pub amount: Option<Decimal>,
    pub reason: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreatedResponse {
    pub transaction_id: TransactionId,
}

#[derive(Debug, Serialize)]
pub struct ChargeMonthlyResponse {
    pub ok: bool,
    pub billed: i64,
}
