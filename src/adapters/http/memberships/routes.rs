use axum::routing::{get, patch};
use axum::Router;

use super::super::AppState;
use super::handlers::{
    create_membership, delete_membership, list_memberships, update_membership,
};

/// `/api/memberships` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_memberships).post(create_membership))
        .route("/:id", patch(update_membership).delete(delete_membership))
}
