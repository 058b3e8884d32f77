use axum::extract::State;
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::LiveDashboardResponse;
use crate::ports::ClubScope;

pub async fn live(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<LiveDashboardResponse>, ApiError> {
    let scope = if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::MemberOf(access.user_id)
    };
    let snapshot = state.dashboard.snapshot(scope).await?;
    Ok(Json(LiveDashboardResponse::from(snapshot)))
}
