use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{list_notifications, mark_read};

/// `/api/notifications` routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_notifications).patch(mark_read))
}
