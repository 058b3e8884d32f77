use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{get_settings, update_settings};

/// `/api/settings` routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_settings).patch(update_settings))
}
