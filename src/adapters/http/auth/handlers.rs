//! HTTP handlers for signup, login, logout, and `GET /me`.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;

use super::super::{ApiError, AppState, OptionalAccess};
use super::dto::{LoginRequest, MeResponse, OkResponse, SessionResponse, SignupRequest, UserResponse};
use crate::domain::foundation::SessionId;
use crate::domain::user::{Profile, UserSession};

fn session_response(
    state: &AppState,
    profile: Profile,
    session: UserSession,
) -> impl IntoResponse {
    let cookie = state
        .session_cookie
        .issue(&session.id.to_string(), session.expires_at);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SessionResponse {
            user: UserResponse::from(profile),
        }),
    )
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (profile, session) = state
        .auth_service
        .signup(&body.email, &body.password, body.full_name.as_deref())
        .await?;
    Ok(session_response(&state, profile, session))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (profile, session) = state.auth_service.login(&body.email, &body.password).await?;
    Ok(session_response(&state, profile, session))
}

/// Deletes the session row if the cookie carries one, then clears the
/// cookie. Logging out while signed out still succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = state.session_cookie.token_from(&headers) {
        if let Ok(session_id) = token.parse::<SessionId>() {
            state.auth_service.logout(session_id).await?;
        }
    }
    Ok((
        AppendHeaders([(SET_COOKIE, state.session_cookie.clear())]),
        Json(OkResponse { ok: true }),
    ))
}

/// The signed-in user, or `{"user": null}` with 200 when signed out.
pub async fn me(
    State(state): State<AppState>,
    OptionalAccess(access): OptionalAccess,
) -> Result<Json<MeResponse>, ApiError> {
    let user = match access {
        Some(access) => state
            .auth_service
            .profile_of(access.user_id)
            .await?
            .map(UserResponse::from),
        None => None,
    };
    Ok(Json(MeResponse { user }))
}
