use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{AttendanceListResponse, AttendanceRow, CheckInRequest, CheckInResponse, ListQuery};
use crate::domain::access::{ClubRole, Role};
use crate::domain::foundation::ErrorCode;
use crate::ports::AttendanceScope;

pub async fn list_attendance(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Query(query): Query<ListQuery>,
) -> Result<Json<AttendanceListResponse>, ApiError> {
    let scope = match access.role {
        Role::Superadmin => AttendanceScope::All,
        Role::Admin | Role::Coach => AttendanceScope::StaffOf(access.user_id),
        Role::Student => AttendanceScope::SelfOnly(access.user_id),
    };
    let rows = state.attendance.list(scope, query.clamped_limit()).await?;

    // A student listing their own rows sees their own label; the join
    // has no other name to offer them.
    let own_label = (access.role == Role::Student).then(|| access.user_label.clone());
    Ok(Json(AttendanceListResponse {
        attendance: rows
            .into_iter()
            .map(|record| {
                let mut row = AttendanceRow::from(record);
                if let Some(label) = &own_label {
                    row.student_name = Some(label.clone());
                }
                row
            })
            .collect(),
    }))
}

/// QR check-in: resolves the token, verifies the caller is a student of
/// the session's club, and inserts the row idempotently.
pub async fn check_in(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, ApiError> {
    let token = body
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("QR token required."))?;

    let session = state
        .trainings
        .find_by_qr_token(token)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::TrainingNotFound, "Session not found."))?;

    let role = state
        .access_resolver
        .club_role_of(access.user_id, session.club_id)
        .await?;
    if role != Some(ClubRole::Student) {
        return Err(ApiError::new(
            StatusCode::FORBIDDEN,
            ErrorCode::Forbidden,
            "Only students can check in.",
        ));
    }

    state.attendance.check_in(session.id, access.user_id).await?;
    Ok(Json(CheckInResponse {
        ok: true,
        session_id: session.id,
    }))
}
