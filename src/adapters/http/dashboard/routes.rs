use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::live;

/// `/api/dashboard` routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/live", get(live))
}
