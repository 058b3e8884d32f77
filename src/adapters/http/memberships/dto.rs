use serde::{Deserialize, Serialize};

use crate::domain::access::ClubRole;
use crate::domain::foundation::{ClubId, MembershipId, UserId};
use crate::domain::membership::Membership;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMembershipRequest {
    pub club_id: ClubId,
    pub user_id: UserId,
    pub role: ClubRole,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMembershipRequest {
    pub role: ClubRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: MembershipId,
    pub role: ClubRole,
    pub user_id: UserId,
    pub club_id: ClubId,
    pub club_name: String,
    pub user_email: String,
    pub user_name: Option<String>,
}

impl From<Membership> for MembershipResponse {
    fn from(m: Membership) -> Self {
        Self {
            id: m.id,
            role: m.role,
            user_id: m.user_id,
            club_id: m.club_id,
            club_name: m.club_name,
            user_email: m.user_email,
            user_name: m.user_full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembershipListResponse {
    pub memberships: Vec<MembershipResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCreatedResponse {
    pub membership_id: MembershipId,
}
