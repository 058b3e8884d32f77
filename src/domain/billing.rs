//! Billing semantics: monthly and registration fee settlement.
//!
//! The database side (the idempotency insert and the bulk debit) lives in
//! the postgres adapter; the math here is pure so the charged/skipped
//! split and eligibility rules can be tested without a database.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One recorded monthly billing run. The unique `run_month` is the
/// per-calendar-month idempotency guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingRun {
    pub run_month: NaiveDate,
    pub executed_at: DateTime<Utc>,
    pub monthly_fee: Decimal,
    pub charged_count: i64,
    pub skipped_count: i64,
}

/// Outcome of attempting the monthly billing phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MonthlyOutcome {
    /// The guard row already existed for this month; nothing was charged.
    AlreadyCharged,
    /// No monthly fee is configured; nothing was charged.
    FeeNotConfigured,
    /// Wallets were settled.
    Charged { charged: i64, skipped: i64 },
}

impl MonthlyOutcome {
    /// Whether this outcome represents a run that actually charged.
    pub fn ran(&self) -> bool {
        matches!(self, MonthlyOutcome::Charged { .. })
    }

    /// Human-readable reason for a run that did not charge.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            MonthlyOutcome::AlreadyCharged => Some("Monthly fee already charged."),
            MonthlyOutcome::FeeNotConfigured => Some("Monthly fee not configured."),
            MonthlyOutcome::Charged { .. } => None,
        }
    }
}

/// Outcome of the registration fee phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RegistrationOutcome {
    /// No registration fee is configured; nothing was charged.
    FeeNotConfigured,
    /// Wallets without a prior registration debit were settled.
    Charged { charged: i64, skipped: i64 },
}

impl RegistrationOutcome {
    pub fn ran(&self) -> bool {
        matches!(self, RegistrationOutcome::Charged { .. })
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            RegistrationOutcome::FeeNotConfigured => Some("Registration fee not configured."),
            RegistrationOutcome::Charged { .. } => None,
        }
    }
}

/// The charged/skipped split for a monthly run: every wallet with
/// `balance >= fee` is charged, the rest are skipped.
pub fn monthly_settlement(fee: Decimal, balances: &[Decimal]) -> (i64, i64) {
    let charged = balances.iter().filter(|b| **b >= fee).count() as i64;
    let skipped = balances.len() as i64 - charged;
    (charged, skipped)
}

/// Whether a wallet is due the one-time registration fee: it must cover
/// the fee and must not already carry a registration transaction.
pub fn registration_due(balance: Decimal, fee: Decimal, has_prior_registration: bool) -> bool {
    !has_prior_registration && balance >= fee
}

/// The first day of the month containing `now`, used as the run key.
pub fn run_month_of(now: DateTime<Utc>) -> NaiveDate {
    let date = now.date_naive();
    // First of the month always exists.
    date.with_day(1).unwrap_or(date)
}
