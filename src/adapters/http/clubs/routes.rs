use axum::routing::{get, patch};
use axum::Router;

use super::super::AppState;
use super::handlers::{catalog, create_club, delete_club, list_clubs, update_club};

/// `/api/clubs` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/catalog", get(catalog))
        .route("/:id", patch(update_club).delete(delete_club))
}
