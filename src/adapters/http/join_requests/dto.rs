use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClubId, JoinRequestId, UserId};
use crate::domain::join_request::JoinRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestResponse {
    pub id: JoinRequestId,
    pub status: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub club_id: ClubId,
    pub club_name: String,
    pub user_id: UserId,
    pub user_email: String,
    pub user_name: Option<String>,
}

impl From<JoinRequest> for JoinRequestResponse {
    fn from(request: JoinRequest) -> Self {
        Self {
            id: request.id,
            status: request.status.as_str().to_string(),
            note: request.note,
            created_at: request.created_at,
            club_id: request.club_id,
            club_name: request.club_name,
            user_id: request.user_id,
            user_email: request.user_email,
            user_name: request.user_full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JoinRequestListResponse {
    pub requests: Vec<JoinRequestResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJoinRequest {
    pub club_id: ClubId,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestCreatedResponse {
    pub request_id: JoinRequestId,
}

#[derive(Debug, Deserialize)]
pub struct ReviewJoinRequest {
    pub status: Option<String>,
}
