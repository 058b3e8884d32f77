use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{check_in, list_attendance};

/// `/api/attendance` routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_attendance).post(check_in))
}
