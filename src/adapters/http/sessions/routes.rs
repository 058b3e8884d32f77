use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{
    create_session, delete_session, get_session, list_sessions, lookup_session,
    session_attendance, update_session,
};

/// `/api/sessions` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/lookup", get(lookup_session))
        .route(
            "/:id",
            get(get_session).patch(update_session).delete(delete_session),
        )
        .route("/:id/attendance", get(session_attendance))
}
