//! PostgreSQL implementation of the wallet repository.
//!
//! The stored `balance` column is maintained by a database trigger that
//! fires on `wallet_transactions` inserts; the adapter never updates it
//! directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, parse_reason, violates_constraint};
use crate::domain::foundation::{ClubId, DomainError, ErrorCode, TransactionId, UserId, WalletId};
use crate::domain::wallet::{TransactionReason, Wallet};
use crate::ports::{ClubScope, TransactionRecord, WalletRepository};

pub struct PostgresWalletRepository {
    pool: PgPool,
}

impl PostgresWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WalletRow {
    id: Uuid,
    club_id: Uuid,
    club_name: String,
    student_id: Uuid,
    student_email: String,
    student_name: Option<String>,
    balance: Decimal,
    created_at: DateTime<Utc>,
}

impl From<WalletRow> for Wallet {
    fn from(row: WalletRow) -> Self {
        Wallet {
            id: WalletId::from_uuid(row.id),
            club_id: ClubId::from_uuid(row.club_id),
            club_name: row.club_name,
            student_id: UserId::from_uuid(row.student_id),
            student_email: row.student_email,
            student_name: row.student_name,
            balance: row.balance,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    wallet_id: Uuid,
    amount: Decimal,
    reason: String,
    club_name: String,
    student_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(TransactionRecord {
            id: TransactionId::from_uuid(row.id),
            wallet_id: WalletId::from_uuid(row.wallet_id),
            amount: row.amount,
            reason: parse_reason(&row.reason)?,
            club_name: row.club_name,
            student_name: row.student_name,
            created_at: row.created_at,
        })
    }
}

const WALLET_SELECT: &str = r#"
    SELECT
        w.id,
        w.club_id,
        c.name AS club_name,
        w.student_id,
        p.email AS student_email,
        p.full_name AS student_name,
        w.balance,
        w.created_at
    FROM wallets w
    JOIN clubs c ON c.id = w.club_id
    JOIN profiles p ON p.id = w.student_id
"#;

const TRANSACTION_SELECT: &str = r#"
    SELECT
        t.id,
        t.wallet_id,
        t.amount,
        t.reason,
        c.name AS club_name,
        p.full_name AS student_name,
        t.created_at
    FROM wallet_transactions t
    JOIN wallets w ON w.id = t.wallet_id
    JOIN clubs c ON c.id = w.club_id
    JOIN profiles p ON p.id = w.student_id
"#;

/// The admin-scoping join shared by wallet listings.
const ADMIN_JOIN: &str = r#"
    JOIN club_memberships m
      ON m.club_id = w.club_id
     AND m.user_id = $1
     AND m.role = 'admin'
"#;

#[async_trait]
impl WalletRepository for PostgresWalletRepository {
    async fn list(&self, scope: ClubScope) -> Result<Vec<Wallet>, DomainError> {
        let rows = match scope {
            ClubScope::All => {
                sqlx::query_as::<_, WalletRow>(&format!(
                    "{WALLET_SELECT} ORDER BY w.created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query_as::<_, WalletRow>(&format!(
                    "{WALLET_SELECT} {ADMIN_JOIN} ORDER BY w.created_at DESC"
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::MemberOf(user_id) | ClubScope::StaffOf(user_id) => {
                sqlx::query_as::<_, WalletRow>(&format!(
                    r#"{WALLET_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = w.club_id
                     AND m.user_id = $1
                    ORDER BY w.created_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list wallets", e))?;

        Ok(rows.into_iter().map(Wallet::from).collect())
    }

    async fn find(&self, id: WalletId) -> Result<Option<Wallet>, DomainError> {
        let row = sqlx::query_as::<_, WalletRow>(&format!("{WALLET_SELECT} WHERE w.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find wallet", e))?;
        Ok(row.map(Wallet::from))
    }

    async fn list_transactions(
        &self,
        scope: ClubScope,
        limit: i64,
    ) -> Result<Vec<TransactionRecord>, DomainError> {
        let rows = match scope {
            ClubScope::All => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "{TRANSACTION_SELECT} ORDER BY t.created_at DESC LIMIT $1"
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "{TRANSACTION_SELECT} {ADMIN_JOIN} ORDER BY t.created_at DESC LIMIT $2"
                ))
                .bind(user_id.as_uuid())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::MemberOf(user_id) | ClubScope::StaffOf(user_id) => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    r#"{TRANSACTION_SELECT}
                    JOIN club_memberships m
                      ON m.club_id = w.club_id
                     AND m.user_id = $1
                    ORDER BY t.created_at DESC
                    LIMIT $2"#
                ))
                .bind(user_id.as_uuid())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list wallet transactions", e))?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    async fn post_transaction(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reason: TransactionReason,
        note: Option<&str>,
        created_by: Option<UserId>,
    ) -> Result<TransactionId, DomainError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO wallet_transactions (id, wallet_id, amount, reason, note, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(wallet_id.as_uuid())
        .bind(amount)
        .bind(reason.as_str())
        .bind(note)
        .bind(created_by.map(|u| *u.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "wallet_transactions_wallet_id_fkey") {
                return DomainError::new(ErrorCode::WalletNotFound, "Wallet not found.");
            }
            db_error("post wallet transaction", e)
        })?;

        Ok(TransactionId::from_uuid(id))
    }

    async fn debit_all(
        &self,
        scope: ClubScope,
        fee: Decimal,
        note: &str,
        created_by: UserId,
    ) -> Result<i64, DomainError> {
        let result = match scope {
            ClubScope::All => {
                sqlx::query(
                    r#"
                    INSERT INTO wallet_transactions (wallet_id, amount, reason, note, created_by)
                    SELECT w.id, -$1, 'monthly', $2, $3
                    FROM wallets w
                    "#,
                )
                .bind(fee)
                .bind(note)
                .bind(created_by.as_uuid())
                .execute(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query(
                    r#"
                    INSERT INTO wallet_transactions (wallet_id, amount, reason, note, created_by)
                    SELECT w.id, -$1, 'monthly', $2, $3
                    FROM wallets w
                    JOIN club_memberships m
                      ON m.club_id = w.club_id
                     AND m.user_id = $4
                     AND m.role = 'admin'
                    "#,
                )
                .bind(fee)
                .bind(note)
                .bind(created_by.as_uuid())
                .bind(user_id.as_uuid())
                .execute(&self.pool)
                .await
            }
            ClubScope::MemberOf(_) | ClubScope::StaffOf(_) => {
                return Err(DomainError::forbidden());
            }
        }
        .map_err(|e| db_error("debit wallets", e))?;

        Ok(result.rows_affected() as i64)
    }
}
