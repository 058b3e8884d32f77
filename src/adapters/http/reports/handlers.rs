use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use chrono::Utc;

use super::super::{ApiError, AppState, RequireAccess};
use super::csv;
use super::dto::{TrendsResponse, WindowQuery, DEFAULT_DAYS};
use crate::domain::access::AccessContext;
use crate::ports::{ClubScope, ReportOverview};

fn admin_scope(access: &AccessContext) -> Result<ClubScope, ApiError> {
    if access.is_superadmin {
        Ok(ClubScope::All)
    } else if access.role.is_admin() {
        Ok(ClubScope::AdminOf(access.user_id))
    } else {
        Err(ApiError::forbidden())
    }
}

/// Headline counts over the trailing 30 days, visible to every signed-in
/// user within their own clubs.
pub async fn overview(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<ReportOverview>, ApiError> {
    let scope = if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::MemberOf(access.user_id)
    };
    let overview = state.reports.overview(scope, DEFAULT_DAYS).await?;
    Ok(Json(overview))
}

pub async fn trends(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Query(query): Query<WindowQuery>,
) -> Result<Json<TrendsResponse>, ApiError> {
    let scope = admin_scope(&access)?;
    let days = query.clamped_days();
    let trends = state.reports.trends(scope, days).await?;
    Ok(Json(TrendsResponse {
        days,
        by_sport: trends.by_sport,
        by_coach: trends.by_coach,
    }))
}

/// Streams the per-session report as a CSV attachment.
pub async fn export(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = admin_scope(&access)?;
    let rows = state.reports.export_rows(scope, query.clamped_days()).await?;
    let body = csv::render(&rows);

    let filename = format!("reports-{}.csv", Utc::now().format("%Y-%m-%d"));
    Ok((
        AppendHeaders([
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ]),
        body,
    ))
}
