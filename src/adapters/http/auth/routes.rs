use axum::routing::{get, post};
use axum::Router;

use super::super::AppState;
use super::handlers::{login, logout, me, signup};

/// `/api/auth` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
