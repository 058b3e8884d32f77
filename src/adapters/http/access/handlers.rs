use axum::Json;

use super::super::OptionalAccess;
use super::dto::AccessResponse;

/// Always 200; the body's `status` field carries the access state.
pub async fn get_access(OptionalAccess(access): OptionalAccess) -> Json<AccessResponse> {
    Json(AccessResponse::from_context(access))
}
