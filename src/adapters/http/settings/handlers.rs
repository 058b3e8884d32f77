use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{SettingsEnvelope, SettingsResponse, UpdateSettingsRequest};

pub async fn get_settings(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<SettingsEnvelope>, ApiError> {
    if !access.role.is_admin() {
        return Err(ApiError::forbidden());
    }
    let settings = state.settings.get().await?;
    Ok(Json(SettingsEnvelope {
        settings: SettingsResponse::from(settings),
    }))
}

fn validated_fee(fee: Option<Decimal>) -> Result<Decimal, ApiError> {
    match fee {
        Some(fee) if fee >= Decimal::ZERO => Ok(fee),
        _ => Err(ApiError::validation("Invalid fees.")),
    }
}

pub async fn update_settings(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsEnvelope>, ApiError> {
    if !access.is_superadmin {
        return Err(ApiError::forbidden());
    }
    let registration_fee = validated_fee(body.registration_fee)?;
    let monthly_fee = validated_fee(body.monthly_fee)?;

    let settings = state.settings.update(registration_fee, monthly_fee).await?;
    Ok(Json(SettingsEnvelope {
        settings: SettingsResponse::from(settings),
    }))
}
