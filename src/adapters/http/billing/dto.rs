use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::billing::{BillingRun, MonthlyOutcome, RegistrationOutcome};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPhaseReport {
    pub ran: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charged: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_month: Option<String>,
}

impl MonthlyPhaseReport {
    pub fn new(outcome: MonthlyOutcome, fee: Option<Decimal>, run_month: NaiveDate) -> Self {
        let reason = outcome.reason();
        let (charged, skipped) = match outcome {
            MonthlyOutcome::Charged { charged, skipped } => (Some(charged), Some(skipped)),
            _ => (None, None),
        };
        Self {
            ran: charged.is_some(),
            reason,
            charged,
            skipped,
            monthly_fee: charged.is_some().then_some(fee).flatten(),
            run_month: charged
                .is_some()
                .then(|| run_month.format("%Y-%m").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPhaseReport {
    pub ran: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charged: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_fee: Option<Decimal>,
}

impl RegistrationPhaseReport {
    pub fn new(outcome: RegistrationOutcome, fee: Option<Decimal>) -> Self {
        let reason = outcome.reason();
        let (charged, skipped) = match outcome {
            RegistrationOutcome::Charged { charged, skipped } => (Some(charged), Some(skipped)),
            _ => (None, None),
        };
        Self {
            ran: charged.is_some(),
            reason,
            charged,
            skipped,
            registration_fee: charged.is_some().then_some(fee).flatten(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub monthly: MonthlyPhaseReport,
    pub registration: RegistrationPhaseReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRunResponse {
    pub run_month: String,
    pub executed_at: DateTime<Utc>,
    pub monthly_fee: Decimal,
    pub charged_count: i64,
    pub skipped_count: i64,
}

impl From<BillingRun> for LastRunResponse {
    fn from(run: BillingRun) -> Self {
        Self {
            run_month: run.run_month.format("%Y-%m").to_string(),
            executed_at: run.executed_at,
            monthly_fee: run.monthly_fee,
            charged_count: run.charged_count,
            skipped_count: run.skipped_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestResponse {
    pub last_run: Option<LastRunResponse>,
    pub current_month_billed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn monthly_report_for_a_charged_run_carries_the_details() {
        let month = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let report = MonthlyPhaseReport::new(
            MonthlyOutcome::Charged {
                charged: 3,
                skipped: 1,
            },
            Some(dec!(70)),
            month,
        );
        assert!(report.ran);
        assert_eq!(report.reason, None);
        assert_eq!(report.charged, Some(3));
        assert_eq!(report.skipped, Some(1));
        assert_eq!(report.monthly_fee, Some(dec!(70)));
        assert_eq!(report.run_month.as_deref(), Some("2026-08"));
    }

    #[test]
    fn monthly_report_for_a_skipped_run_carries_only_the_reason() {
        let month = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let report = MonthlyPhaseReport::new(MonthlyOutcome::AlreadyCharged, Some(dec!(70)), month);
        assert!(!report.ran);
        assert_eq!(report.reason, Some("Monthly fee already charged."));
        assert_eq!(report.charged, None);
        assert_eq!(report.run_month, None);
    }

    #[test]
    fn registration_report_without_fee_names_the_reason() {
        let report = RegistrationPhaseReport::new(RegistrationOutcome::FeeNotConfigured, None);
        assert!(!report.ran);
        assert_eq!(report.reason, Some("Registration fee not configured."));
        assert_eq!(report.registration_fee, None);
    }
}
