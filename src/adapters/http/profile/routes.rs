use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::get_profile;

/// `/api/profile` routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile))
}
