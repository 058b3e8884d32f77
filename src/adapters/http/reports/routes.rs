use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{export, overview, trends};

/// `/api/reports` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview))
        .route("/trends", get(trends))
        .route("/export", get(export))
}
