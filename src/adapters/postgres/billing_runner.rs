//! PostgreSQL implementation of the billing runner.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::db_error;
use crate::domain::billing::{BillingRun, MonthlyOutcome, RegistrationOutcome};
use crate::domain::foundation::DomainError;
use crate::ports::BillingRunner;

pub struct PostgresBillingRunner {
    pool: PgPool,
}

impl PostgresBillingRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BillingRunRow {
    run_month: NaiveDate,
    executed_at: DateTime<Utc>,
    monthly_fee: Decimal,
    charged_count: i64,
    skipped_count: i64,
}

impl From<BillingRunRow> for BillingRun {
    fn from(row: BillingRunRow) -> Self {
        BillingRun {
            run_month: row.run_month,
            executed_at: row.executed_at,
            monthly_fee: row.monthly_fee,
            charged_count: row.charged_count,
            skipped_count: row.skipped_count,
        }
    }
}

#[async_trait]
impl BillingRunner for PostgresBillingRunner {
    async fn run_monthly(
        &self,
        fee: Decimal,
        run_month: NaiveDate,
    ) -> Result<MonthlyOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin monthly billing", e))?;

        // The guard: the unique run_month row decides, once, whether this
        // month still needs billing. Dropping the transaction rolls the
        // insert back on the already-charged path.
        let guard: Option<(uuid::Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO billing_runs (run_month, monthly_fee)
            VALUES ($1, $2)
            ON CONFLICT (run_month) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(run_month)
        .bind(fee)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("insert billing guard", e))?;

        if guard.is_none() {
            tx.rollback()
                .await
                .map_err(|e| db_error("rollback monthly billing", e))?;
            return Ok(MonthlyOutcome::AlreadyCharged);
        }

        let (total,): (i64,) = sqlx::query_as("SELECT count(*) FROM wallets")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("count wallets", e))?;

        let note = format!("Monthly fee {}", run_month.format("%Y-%m"));
        let debits = sqlx::query(
            r#"
            INSERT INTO wallet_transactions (wallet_id, amount, reason, note)
            SELECT w.id, -$1, 'monthly', $2
            FROM wallets w
            WHERE w.balance >= $1
            "#,
        )
        .bind(fee)
        .bind(&note)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("debit eligible wallets", e))?;

        let charged = debits.rows_affected() as i64;
        let skipped = (total - charged).max(0);

        sqlx::query(
            r#"
            UPDATE billing_runs
            SET charged_count = $2,
                skipped_count = $3
            WHERE run_month = $1
            "#,
        )
        .bind(run_month)
        .bind(charged)
        .bind(skipped)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("record billing counts", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit monthly billing", e))?;

        Ok(MonthlyOutcome::Charged { charged, skipped })
    }

    async fn run_registration(&self, fee: Decimal) -> Result<RegistrationOutcome, DomainError> {
        // Deliberately not transactional, matching the monthly run's
        // sibling behavior in production: concurrent invocations can race
        // past the NOT EXISTS check. See the port docs.
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*)
            FROM wallets w
            WHERE NOT EXISTS (
                SELECT 1
                FROM wallet_transactions t
                WHERE t.wallet_id = w.id
                  AND t.reason = 'registration'
            )
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count unregistered wallets", e))?;

        let debits = sqlx::query(
            r#"
            INSERT INTO wallet_transactions (wallet_id, amount, reason, note)
            SELECT w.id, -$1, 'registration', 'Registration fee'
            FROM wallets w
            WHERE w.balance >= $1
              AND NOT EXISTS (
                  SELECT 1
                  FROM wallet_transactions t
                  WHERE t.wallet_id = w.id
                    AND t.reason = 'registration'
              )
            "#,
        )
        .bind(fee)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("debit registration fees", e))?;

        let charged = debits.rows_affected() as i64;
        let skipped = (total - charged).max(0);

        Ok(RegistrationOutcome::Charged { charged, skipped })
    }

    async fn latest_run(&self) -> Result<Option<BillingRun>, DomainError> {
        let row = sqlx::query_as::<_, BillingRunRow>(
            r#"
            SELECT run_month, executed_at, monthly_fee,
                   charged_count::bigint AS charged_count,
                   skipped_count::bigint AS skipped_count
            FROM billing_runs
            ORDER BY run_month DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("latest billing run", e))?;

        Ok(row.map(BillingRun::from))
    }

    async fn month_billed(&self, run_month: NaiveDate) -> Result<bool, DomainError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM billing_runs WHERE run_month = $1)",
        )
        .bind(run_month)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("check billing month", e))?;
        Ok(exists)
    }
}
