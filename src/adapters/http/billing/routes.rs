use axum::routing::{get, post};
use axum::Router;

use super::super::AppState;
use super::handlers::{latest_run, run_billing};

/// `/api/billing-runs` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/run", post(run_billing))
        .route("/latest", get(latest_run))
}
