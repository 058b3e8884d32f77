//! Sports and clubs: the tenant structure.

use chrono::{DateTime, Utc};

use super::foundation::{ClubId, SportId, UserId};

/// A sport discipline. Clubs belong to exactly one sport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sport {
    pub id: SportId,
    pub name: String,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A club: the tenant unit that memberships, training sessions, and
/// wallets hang off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub sport_id: SportId,
    pub sport_name: String,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
