use axum::extract::{Path, State};
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    CreateJoinRequest, JoinRequestCreatedResponse, JoinRequestListResponse, JoinRequestResponse,
    ReviewJoinRequest,
};
use crate::domain::access::ClubRole;
use crate::domain::foundation::{ErrorCode, JoinRequestId};
use crate::domain::join_request::JoinRequestStatus;
use crate::ports::ClubScope;

pub async fn list_requests(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<JoinRequestListResponse>, ApiError> {
    if !access.role.is_admin() {
        return Err(ApiError::forbidden());
    }
    let scope = if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::AdminOf(access.user_id)
    };
    let requests = state.join_requests.list(scope).await?;
    Ok(Json(JoinRequestListResponse {
        requests: requests.into_iter().map(JoinRequestResponse::from).collect(),
    }))
}

pub async fn list_own_requests(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<JoinRequestListResponse>, ApiError> {
    let requests = state.join_requests.list_for_user(access.user_id).await?;
    Ok(Json(JoinRequestListResponse {
        requests: requests.into_iter().map(JoinRequestResponse::from).collect(),
    }))
}

pub async fn create_request(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<CreateJoinRequest>,
) -> Result<Json<JoinRequestCreatedResponse>, ApiError> {
    let note = body.note.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let request = state
        .join_requests
        .create(body.club_id, access.user_id, note)
        .await?;
    Ok(Json(JoinRequestCreatedResponse {
        request_id: request.id,
    }))
}

/// Moves a request to a new status. Approval also ensures the requester
/// holds a student membership in the club, so approving is the one
/// join-request action with a side effect.
pub async fn review_request(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<JoinRequestId>,
    Json(body): Json<ReviewJoinRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = body
        .status
        .as_deref()
        .and_then(JoinRequestStatus::parse)
        .ok_or_else(|| ApiError::validation("Invalid status."))?;

    let request = state
        .join_requests
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::JoinRequestNotFound, "Request not found."))?;
    state
        .access_resolver
        .require_club_role(&access, request.club_id, &[ClubRole::Admin])
        .await?;

    state.join_requests.set_status(id, status).await?;
    if status == JoinRequestStatus::Approved {
        state
            .memberships
            .ensure_student(request.club_id, request.user_id)
            .await?;
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}
