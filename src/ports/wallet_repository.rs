//! Wallet and ledger persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::ClubScope;
use crate::domain::foundation::{DomainError, TransactionId, UserId, WalletId};
use crate::domain::wallet::{TransactionReason, Wallet};

/// One ledger entry denormalized for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub reason: TransactionReason,
    pub club_name: String,
    pub student_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Wallets visible under the scope, newest first.
    async fn list(&self, scope: ClubScope) -> Result<Vec<Wallet>, DomainError>;

    async fn find(&self, id: WalletId) -> Result<Option<Wallet>, DomainError>;

    /// Latest ledger entries under the scope, newest first, at most `limit`.
    async fn list_transactions(
        &self,
        scope: ClubScope,
        limit: i64,
    ) -> Result<Vec<TransactionRecord>, DomainError>;

    /// Appends a ledger entry. The stored balance is maintained by a
    /// database trigger, never written directly.
    ///
    /// # Errors
    ///
    /// - `WalletNotFound` when the wallet does not exist
    async fn post_transaction(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reason: TransactionReason,
        note: Option<&str>,
        created_by: Option<UserId>,
    ) -> Result<TransactionId, DomainError>;

    /// Debits every wallet under the scope by `fee` in one statement,
    /// unconditionally. Returns the number of wallets billed.
    async fn debit_all(
        &self,
        scope: ClubScope,
        fee: Decimal,
        note: &str,
        created_by: UserId,
    ) -> Result<i64, DomainError>;
}
