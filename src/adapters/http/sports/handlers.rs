use axum::extract::{Path, State};
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    SingleSportResponse, SportListResponse, SportRequest, SportResponse, SportWithCountResponse,
};
use crate::domain::access::AccessContext;
use crate::domain::foundation::SportId;

fn require_superadmin(access: &AccessContext) -> Result<(), ApiError> {
    if access.is_superadmin {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

fn validated_name(raw: &str) -> Result<&str, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Sport name is required."));
    }
    Ok(name)
}

pub async fn list_sports(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<SportListResponse>, ApiError> {
    require_superadmin(&access)?;
    let sports = state.sports.list().await?;
    Ok(Json(SportListResponse {
        sports: sports.into_iter().map(SportWithCountResponse::from).collect(),
    }))
}

pub async fn create_sport(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<SportRequest>,
) -> Result<Json<SingleSportResponse>, ApiError> {
    require_superadmin(&access)?;
    let name = validated_name(&body.name)?;
    let sport = state.sports.create(name, access.user_id).await?;
    Ok(Json(SingleSportResponse {
        sport: SportResponse {
            id: sport.id,
            name: sport.name,
        },
    }))
}

pub async fn rename_sport(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<SportId>,
    Json(body): Json<SportRequest>,
) -> Result<Json<SingleSportResponse>, ApiError> {
    require_superadmin(&access)?;
    let name = validated_name(&body.name)?;
    let sport = state.sports.rename(id, name).await?;
    Ok(Json(SingleSportResponse {
        sport: SportResponse {
            id: sport.id,
            name: sport.name,
        },
    }))
}

pub async fn delete_sport(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<SportId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_superadmin(&access)?;
    state.sports.delete(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
