//! Role resolution and access scoping.
//!
//! The system is multi-tenant: the same person can administer one club and
//! be an ordinary student in another, so role is a per-club attribute, not
//! a global one. The coarse [`Role`] returned by [`effective_role`] exists
//! to pick a dashboard view; it is NOT sufficient authorization for
//! club-scoped mutations, which must re-check the caller's membership row
//! against the target club (see `AccessResolver::club_role_of`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::foundation::{ClubId, UserId};

/// Per-club membership role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubRole {
    Admin,
    Coach,
    Student,
}

impl ClubRole {
    /// Storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Admin => "admin",
            ClubRole::Coach => "coach",
            ClubRole::Student => "student",
        }
    }

    /// Parses a storage value; returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(ClubRole::Admin),
            "coach" => Some(ClubRole::Coach),
            "student" => Some(ClubRole::Student),
            _ => None,
        }
    }
}

impl fmt::Display for ClubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse, club-independent role used for navigation and dashboard gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Coach,
    Student,
}

impl Role {
    /// Storage/API representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Coach => "coach",
            Role::Student => "student",
        }
    }

    /// True for roles that manage clubs (superadmin, admin, coach).
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Student)
    }

    /// True for roles with administrative reach (superadmin, admin).
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin)
    }
}

impl From<ClubRole> for Role {
    fn from(role: ClubRole) -> Self {
        match role {
            ClubRole::Admin => Role::Admin,
            ClubRole::Coach => Role::Coach,
            ClubRole::Student => Role::Student,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One club a user may operate on, with their role in that club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubAccess {
    pub id: ClubId,
    pub name: String,
    pub sport: Option<String>,
    pub role: ClubRole,
}

/// The authenticated caller's identity and scope.
///
/// Produced by the access resolver from a session token; `None` at the
/// resolver level means unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub user_id: UserId,
    pub user_label: String,
    pub role: Role,
    pub clubs: Vec<ClubAccess>,
    pub is_superadmin: bool,
}

impl AccessContext {
    /// The caller's role within a specific club, if they are a member.
    ///
    /// This consults the already-loaded membership list; handlers that
    /// mutate club data should prefer the repository-backed
    /// `club_role_of` check, which reads the current row.
    pub fn club_role(&self, club_id: ClubId) -> Option<ClubRole> {
        self.clubs.iter().find(|c| c.id == club_id).map(|c| c.role)
    }

    /// True when the caller has no per-club access and is not superadmin.
    pub fn has_no_membership(&self) -> bool {
        !self.is_superadmin && self.clubs.is_empty()
    }
}

/// Collapses a user's memberships into the coarse effective role.
///
/// Superadmin wins outright and bypasses per-club scoping. Otherwise the
/// highest role across all memberships wins, in priority order
/// admin > coach > student, with `Student` as the no-membership default.
pub fn effective_role(memberships: &[ClubAccess], is_superadmin: bool) -> Role {
    if is_superadmin {
        return Role::Superadmin;
    }
    if memberships.iter().any(|m| m.role == ClubRole::Admin) {
        return Role::Admin;
    }
    if memberships.iter().any(|m| m.role == ClubRole::Coach) {
        return Role::Coach;
    }
    Role::Student
}

/// Display label for a user: trimmed full name, else email, else "User".
pub fn user_label(full_name: Option<&str>, email: &str) -> String {
    match full_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            if email.is_empty() {
                "User".to_string()
            } else {
                email.to_string()
            }
        }
    }
}
