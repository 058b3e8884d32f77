//! Response body for `GET /api/access`.

use serde::Serialize;

use crate::domain::access::{AccessContext, ClubAccess, Role};
use crate::domain::foundation::UserId;

/// The three access states the frontend branches on.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum AccessResponse {
    SignedOut,
    #[serde(rename_all = "camelCase")]
    NoMembership {
        user_id: UserId,
        user_label: String,
    },
    #[serde(rename_all = "camelCase")]
    Allowed {
        role: Role,
        clubs: Vec<ClubAccess>,
        user_id: UserId,
        user_label: String,
    },
}

impl AccessResponse {
    pub fn from_context(access: Option<AccessContext>) -> Self {
        match access {
            None => AccessResponse::SignedOut,
            Some(access) if access.has_no_membership() => AccessResponse::NoMembership {
                user_id: access.user_id,
                user_label: access.user_label,
            },
            Some(access) => AccessResponse::Allowed {
                role: access.role,
                clubs: access.clubs,
                user_id: access.user_id,
                user_label: access.user_label,
            },
        }
    }
}
