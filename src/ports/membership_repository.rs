//! Club membership persistence port.

use async_trait::async_trait;

use super::ClubScope;
use crate::domain::access::{ClubAccess, ClubRole};
use crate::domain::foundation::{ClubId, DomainError, MembershipId, UserId};
use crate::domain::membership::Membership;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// All memberships of a user with club and sport names, ordered by
    /// club name. Feeds the access resolver.
    async fn clubs_of(&self, user_id: UserId) -> Result<Vec<ClubAccess>, DomainError>;

    /// The user's role in one club, read fresh from the membership row.
    /// This is the authorization check every club-scoped mutation runs.
    async fn club_role_of(
        &self,
        user_id: UserId,
        club_id: ClubId,
    ) -> Result<Option<ClubRole>, DomainError>;

    /// Memberships visible under the scope, newest first.
    async fn list(&self, scope: ClubScope) -> Result<Vec<Membership>, DomainError>;

    async fn find(&self, id: MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Creates a membership.
    ///
    /// # Errors
    ///
    /// - `Conflict` when the (club, user) pair already has a row
    /// - `NotFound` when the club or user does not exist
    async fn create(
        &self,
        club_id: ClubId,
        user_id: UserId,
        role: ClubRole,
    ) -> Result<Membership, DomainError>;

    /// Changes the role on an existing row.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` when the row is missing
    async fn update_role(
        &self,
        id: MembershipId,
        role: ClubRole,
    ) -> Result<Membership, DomainError>;

    async fn delete(&self, id: MembershipId) -> Result<(), DomainError>;

    /// Inserts a `student` membership if none exists for the pair.
    /// Idempotent; used when a join request is approved.
    async fn ensure_student(&self, club_id: ClubId, user_id: UserId) -> Result<(), DomainError>;
}
