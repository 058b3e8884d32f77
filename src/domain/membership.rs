//! Club memberships: the (user, club, role) assignment.

use chrono::{DateTime, Utc};

use super::access::{ClubRole, Role};
use super::foundation::{ClubId, MembershipId, UserId};

/// One membership row, denormalized with the names handlers render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: MembershipId,
    pub club_id: ClubId,
    pub club_name: String,
    pub user_id: UserId,
    pub user_email: String,
    pub user_full_name: Option<String>,
    pub role: ClubRole,
    pub created_at: DateTime<Utc>,
}

/// The membership roles a caller may grant or assign.
///
/// Superadmins hand out any role; club admins may only appoint coaches
/// and students, never other admins.
pub fn grantable_roles(caller: Role) -> &'static [ClubRole] {
    match caller {
        Role::Superadmin => &[ClubRole::Admin, ClubRole::Coach, ClubRole::Student],
        Role::Admin => &[ClubRole::Coach, ClubRole::Student],
        Role::Coach | Role::Student => &[],
    }
}
