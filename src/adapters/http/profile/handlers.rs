use axum::extract::State;
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    AttendanceSummaryResponse, ProfileResponse, ProfileUserResponse, ProfileWalletResponse,
};

pub async fn get_profile(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<ProfileResponse>, ApiError> {
    let overview = state.profile.overview(access.user_id).await?;
    Ok(Json(ProfileResponse {
        user: ProfileUserResponse::new(overview.profile, access.role),
        clubs: access.clubs,
        wallets: overview
            .wallets
            .into_iter()
            .map(ProfileWalletResponse::from)
            .collect(),
        attendance_summary: AttendanceSummaryResponse::from(overview.attendance),
    }))
}
