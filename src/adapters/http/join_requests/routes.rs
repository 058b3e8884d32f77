use axum::routing::{get, patch};
use axum::Router;

use super::super::AppState;
use super::handlers::{create_request, list_own_requests, list_requests, review_request};

/// `/api/join-requests` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/self", get(list_own_requests))
        .route("/:id", patch(review_request))
}
