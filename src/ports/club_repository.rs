//! Club persistence port.

use async_trait::async_trait;

use super::ClubScope;
use crate::domain::club::Club;
use crate::domain::foundation::{ClubId, DomainError, SportId, UserId};

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ClubUpdate {
    pub name: Option<String>,
    pub sport_id: Option<SportId>,
}

#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Clubs visible under the scope, with sport names, ordered by name.
    async fn list(&self, scope: ClubScope) -> Result<Vec<Club>, DomainError>;

    /// Every club with its sport name, for the join-request catalog.
    async fn catalog(&self) -> Result<Vec<Club>, DomainError>;

    async fn find(&self, id: ClubId) -> Result<Option<Club>, DomainError>;

    /// Creates a club.
    ///
    /// # Errors
    ///
    /// - `SportNotFound` when the sport id does not exist
    async fn create(
        &self,
        name: &str,
        sport_id: SportId,
        created_by: UserId,
    ) -> Result<Club, DomainError>;

    /// # Errors
    ///
    /// - `ClubNotFound` when the club is missing
    /// - `SportNotFound` when moving to a nonexistent sport
    async fn update(&self, id: ClubId, update: ClubUpdate) -> Result<Club, DomainError>;

    async fn delete(&self, id: ClubId) -> Result<(), DomainError>;
}
