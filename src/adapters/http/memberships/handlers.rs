use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    CreateMembershipRequest, MembershipCreatedResponse, MembershipListResponse,
    MembershipResponse, UpdateMembershipRequest,
};
use crate::domain::access::{AccessContext, ClubRole};
use crate::domain::foundation::{ErrorCode, MembershipId};
use crate::domain::membership::{grantable_roles, Membership};
use crate::ports::ClubScope;

fn require_admin(access: &AccessContext) -> Result<(), ApiError> {
    if access.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

/// The role must be one the caller is allowed to hand out: superadmins
/// grant anything, club admins only coach and student.
fn require_grantable(access: &AccessContext, role: ClubRole) -> Result<(), ApiError> {
    if grantable_roles(access.role).contains(&role) {
        Ok(())
    } else {
        Err(ApiError::new(
            StatusCode::FORBIDDEN,
            ErrorCode::Forbidden,
            "Role not allowed.",
        ))
    }
}

/// Loads the membership and re-checks that a non-superadmin caller
/// administers its club, reading the admin row fresh.
async fn load_for_admin(
    state: &AppState,
    access: &AccessContext,
    id: MembershipId,
) -> Result<Membership, ApiError> {
    let membership = state.memberships.find(id).await?.ok_or_else(|| {
        ApiError::not_found(ErrorCode::MembershipNotFound, "Membership not found.")
    })?;
    state
        .access_resolver
        .require_club_role(access, membership.club_id, &[ClubRole::Admin])
        .await?;
    Ok(membership)
}

pub async fn list_memberships(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<MembershipListResponse>, ApiError> {
    require_admin(&access)?;
    let scope = if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::AdminOf(access.user_id)
    };
    let memberships = state.memberships.list(scope).await?;
    Ok(Json(MembershipListResponse {
        memberships: memberships.into_iter().map(MembershipResponse::from).collect(),
    }))
}

pub async fn create_membership(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<CreateMembershipRequest>,
) -> Result<Json<MembershipCreatedResponse>, ApiError> {
    require_admin(&access)?;
    require_grantable(&access, body.role)?;
    state
        .access_resolver
        .require_club_role(&access, body.club_id, &[ClubRole::Admin])
        .await?;

    let membership = state
        .memberships
        .create(body.club_id, body.user_id, body.role)
        .await?;
    Ok(Json(MembershipCreatedResponse {
        membership_id: membership.id,
    }))
}

pub async fn update_membership(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<MembershipId>,
    Json(body): Json<UpdateMembershipRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&access)?;
    require_grantable(&access, body.role)?;
    load_for_admin(&state, &access, id).await?;

    state.memberships.update_role(id, body.role).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn delete_membership(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<MembershipId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&access)?;
    load_for_admin(&state, &access, id).await?;

    state.memberships.delete(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
