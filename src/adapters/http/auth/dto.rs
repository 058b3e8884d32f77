//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::user::Profile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub is_superadmin: bool,
}

impl From<Profile> for UserResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            is_superadmin: profile.is_superadmin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
}

/// `GET /me` body; `user` is null when signed out.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
