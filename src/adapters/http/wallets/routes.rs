use axum::routing::{get, post};
use axum::Router;

use super::super::AppState;
use super::handlers::{charge_monthly, list_transactions, list_wallets, post_transaction};

/// `/api/wallets` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wallets))
        .route("/transactions", get(list_transactions).post(post_transaction))
        .route("/charge-monthly", post(charge_monthly))
}
