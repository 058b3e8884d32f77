use axum::extract::State;
use axum::Json;
use chrono::Utc;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{LastRunResponse, LatestResponse, MonthlyPhaseReport, RegistrationPhaseReport, RunResponse};
use crate::domain::access::AccessContext;
use crate::domain::billing::{run_month_of, MonthlyOutcome, RegistrationOutcome};

fn require_superadmin(access: &AccessContext) -> Result<(), ApiError> {
    if access.is_superadmin {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

/// A fee of zero (or less) counts as not configured, same as the manual
/// charge endpoint. Running a zero-fee phase would still consume the
/// month's guard row and stamp wallets with no-op registration entries.
fn configured(fee: Option<rust_decimal::Decimal>) -> Option<rust_decimal::Decimal> {
    fee.filter(|fee| fee.is_sign_positive() && !fee.is_zero())
}

/// Runs both billing phases back to back and reports each separately.
/// A phase without a configured fee is skipped, not an error; the other
/// phase still runs.
pub async fn run_billing(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<RunResponse>, ApiError> {
    require_superadmin(&access)?;

    let settings = state.settings.get().await?;
    let run_month = run_month_of(Utc::now());
    let monthly_fee = configured(settings.monthly_fee);
    let registration_fee = configured(settings.registration_fee);

    let monthly = match monthly_fee {
        Some(fee) => state.billing.run_monthly(fee, run_month).await?,
        None => MonthlyOutcome::FeeNotConfigured,
    };
    let registration = match registration_fee {
        Some(fee) => state.billing.run_registration(fee).await?,
        None => RegistrationOutcome::FeeNotConfigured,
    };

    Ok(Json(RunResponse {
        monthly: MonthlyPhaseReport::new(monthly, monthly_fee, run_month),
        registration: RegistrationPhaseReport::new(registration, registration_fee),
    }))
}

pub async fn latest_run(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<LatestResponse>, ApiError> {
    if !access.role.is_admin() {
        return Err(ApiError::forbidden());
    }

    let last_run = state.billing.latest_run().await?.map(LastRunResponse::from);
    let current_month_billed = state.billing.month_billed(run_month_of(Utc::now())).await?;
    Ok(Json(LatestResponse {
        last_run,
        current_month_billed,
    }))
}
