//! Billing run port: the monthly and registration fee settlements.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::billing::{BillingRun, MonthlyOutcome, RegistrationOutcome};
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait BillingRunner: Send + Sync {
    /// Runs the monthly settlement for `run_month` inside one transaction.
    ///
    /// The per-month idempotency guard is an insert into `billing_runs`
    /// with `on conflict (run_month) do nothing`: zero rows back means the
    /// month was already billed and the whole run rolls back. Otherwise
    /// every wallet with `balance >= fee` is debited in one statement and
    /// the guard row's counts are updated before commit.
    async fn run_monthly(
        &self,
        fee: Decimal,
        run_month: NaiveDate,
    ) -> Result<MonthlyOutcome, DomainError>;

    /// Charges the one-time registration fee to every wallet that covers
    /// it and has no prior `reason = 'registration'` entry.
    ///
    /// Unlike the monthly run this is not transactional: two concurrent
    /// invocations can race past the not-exists check and double-charge.
    /// Known gap, kept as-is.
    async fn run_registration(&self, fee: Decimal) -> Result<RegistrationOutcome, DomainError>;

    /// The most recent recorded run, if any.
    async fn latest_run(&self) -> Result<Option<BillingRun>, DomainError>;

    /// Whether a guard row exists for `run_month`.
    async fn month_billed(&self, run_month: NaiveDate) -> Result<bool, DomainError>;
}
