use axum::extract::{Path, Query, State};
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    CreateSessionRequest, LookupQuery, LookupResponse, SessionAttendanceResponse,
    SessionAttendanceRow, SessionCreatedResponse, SessionListResponse, SessionResponse,
    SessionSummary, SingleSessionResponse, UpdateSessionRequest,
};
use crate::domain::access::{AccessContext, ClubRole};
use crate::domain::foundation::{ErrorCode, TrainingId};
use crate::domain::training::{generate_qr_token, TrainingSession};
use crate::ports::{ClubScope, NewTrainingSession, TrainingUpdate};

fn require_staff(access: &AccessContext) -> Result<(), ApiError> {
    if access.role.is_staff() {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

fn session_not_found() -> ApiError {
    ApiError::not_found(ErrorCode::TrainingNotFound, "Session not found.")
}

/// Loads a session and re-checks the caller's role in its owning club.
///
/// Non-superadmins get a flat 403 for sessions they cannot see, unknown
/// ids included, so the endpoint does not confirm which ids exist.
async fn load_with_role(
    state: &AppState,
    access: &AccessContext,
    id: TrainingId,
    allowed: &[ClubRole],
) -> Result<TrainingSession, ApiError> {
    let session = state.trainings.find(id).await?;
    let Some(session) = session else {
        return Err(if access.is_superadmin {
            session_not_found()
        } else {
            ApiError::forbidden()
        });
    };
    state
        .access_resolver
        .require_club_role(access, session.club_id, allowed)
        .await?;
    Ok(session)
}

pub async fn list_sessions(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<SessionListResponse>, ApiError> {
    require_staff(&access)?;
    let scope = if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::StaffOf(access.user_id)
    };
    let sessions = state.trainings.list(scope).await?;
    Ok(Json(SessionListResponse {
        sessions: sessions.into_iter().map(SessionResponse::from).collect(),
    }))
}

pub async fn create_session(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<SessionCreatedResponse>, ApiError> {
    require_staff(&access)?;
    let title = body.title.trim();
    if title.is_empty() {
        return Err(ApiError::validation(
            "Title, start time, and club are required.",
        ));
    }

    // Club existence is answered before the role check so a missing club
    // is a 404, not a 403.
    if state.clubs.find(body.club_id).await?.is_none() {
        return Err(ApiError::not_found(
            ErrorCode::ClubNotFound,
            "Club not found.",
        ));
    }
    state
        .access_resolver
        .require_club_role(&access, body.club_id, &[ClubRole::Admin, ClubRole::Coach])
        .await?;

    let session = state
        .trainings
        .create(NewTrainingSession {
            club_id: body.club_id,
            coach_id: Some(access.user_id),
            title: title.to_string(),
            starts_at: body.starts_at,
            location: body
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
            capacity: body.capacity,
            qr_token: generate_qr_token(),
        })
        .await?;
    Ok(Json(SessionCreatedResponse {
        session_id: session.id,
    }))
}

pub async fn get_session(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<TrainingId>,
) -> Result<Json<SingleSessionResponse>, ApiError> {
    let session = load_with_role(
        &state,
        &access,
        id,
        &[ClubRole::Admin, ClubRole::Coach, ClubRole::Student],
    )
    .await?;
    Ok(Json(SingleSessionResponse {
        session: SessionResponse::from(session),
    }))
}

pub async fn update_session(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<TrainingId>,
    Json(body): Json<UpdateSessionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    load_with_role(&state, &access, id, &[ClubRole::Admin, ClubRole::Coach]).await?;

    let title = body.title.trim();
    if title.is_empty() {
        return Err(ApiError::validation("Title and start time are required."));
    }

    let location = body
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from);
    state
        .trainings
        .update(
            id,
            TrainingUpdate {
                title: Some(title.to_string()),
                starts_at: Some(body.starts_at),
                // Absent fields clear rather than keep, matching the form
                // that always posts the full session.
                location: Some(location),
                capacity: Some(body.capacity),
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn delete_session(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<TrainingId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    load_with_role(&state, &access, id, &[ClubRole::Admin, ClubRole::Coach]).await?;
    state.trainings.delete(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Resolves a QR token to a session summary for any signed-in user.
pub async fn lookup_session(
    State(state): State<AppState>,
    RequireAccess(_access): RequireAccess,
    Query(query): Query<LookupQuery>,
) -> Result<Json<LookupResponse>, ApiError> {
    let token = query
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Token is required."))?;

    let session = state
        .trainings
        .find_by_qr_token(token)
        .await?
        .ok_or_else(session_not_found)?;

    Ok(Json(LookupResponse {
        session: SessionSummary {
            id: session.id,
            title: session.title,
            club_name: session.club_name,
            sport_name: session.sport_name,
        },
    }))
}

pub async fn session_attendance(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<TrainingId>,
) -> Result<Json<SessionAttendanceResponse>, ApiError> {
    require_staff(&access)?;
    load_with_role(&state, &access, id, &[ClubRole::Admin, ClubRole::Coach]).await?;

    let rows = state.attendance.list_for_session(id).await?;
    Ok(Json(SessionAttendanceResponse {
        attendance: rows.into_iter().map(SessionAttendanceRow::from).collect(),
    }))
}
