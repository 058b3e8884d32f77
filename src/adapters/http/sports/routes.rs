use axum::routing::{get, patch};
use axum::Router;

use super::super::AppState;
use super::handlers::{create_sport, delete_sport, list_sports, rename_sport};

/// `/api/sports` routes (superadmin only, enforced in the handlers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sports).post(create_sport))
        .route("/:id", patch(rename_sport).delete(delete_sport))
}
