use axum::extract::{Query, State};
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    ListQuery, MarkReadRequest, MarkReadResponse, NotificationListResponse, NotificationResponse,
};
use crate::ports::NotificationFilter;

pub async fn list_notifications(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Query(query): Query<ListQuery>,
) -> Result<Json<NotificationListResponse>, ApiError> {
    let filter = NotificationFilter {
        limit: query.clamped_limit(),
        unread_only: query.unread_only(),
        kind: query.kind.clone().filter(|k| !k.is_empty()),
    };
    let page = state.notifications.list(access.user_id, filter).await?;
    Ok(Json(NotificationListResponse {
        notifications: page
            .notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
        unread_count: page.unread_count,
    }))
}

/// Marks either an explicit id list or everything unread as read. The
/// repository scopes the update to the caller, so foreign ids are
/// silently ignored rather than rejected.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let updated = if body.all == Some(true) {
        state.notifications.mark_all_read(access.user_id).await?
    } else {
        let ids = body.ids.unwrap_or_default();
        if ids.is_empty() {
            return Err(ApiError::validation("No notifications selected."));
        }
        state.notifications.mark_read(access.user_id, &ids).await?
    };
    Ok(Json(MarkReadResponse { updated }))
}
