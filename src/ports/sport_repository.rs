//! Sport persistence port.

use async_trait::async_trait;

use crate::domain::club::Sport;
use crate::domain::foundation::{DomainError, SportId, UserId};

/// A sport with the number of clubs attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportWithClubCount {
    pub sport: Sport,
    pub club_count: i64,
}

#[async_trait]
pub trait SportRepository: Send + Sync {
    /// All sports with club counts, ordered by name.
    async fn list(&self) -> Result<Vec<SportWithClubCount>, DomainError>;

    /// # Errors
    ///
    /// - `Conflict` when a sport with the same name exists
    async fn create(&self, name: &str, created_by: UserId) -> Result<Sport, DomainError>;

    /// # Errors
    ///
    /// - `SportNotFound` when the sport is missing
    async fn rename(&self, id: SportId, name: &str) -> Result<Sport, DomainError>;

    async fn delete(&self, id: SportId) -> Result<(), DomainError>;
}
