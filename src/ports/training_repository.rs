//! Training session persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::ClubScope;
use crate::domain::foundation::{ClubId, DomainError, TrainingId, UserId};
use crate::domain::training::TrainingSession;

/// Fields for scheduling a training session. The sport is derived from
/// the club by the adapter; the QR token comes from the caller so it can
/// be generated in the domain.
#[derive(Debug, Clone)]
pub struct NewTrainingSession {
    pub club_id: ClubId,
    pub coach_id: Option<UserId>,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub qr_token: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TrainingUpdate {
    pub title: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: Option<Option<String>>,
    pub capacity: Option<Option<i32>>,
}

#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Sessions visible under the scope, newest first.
    async fn list(&self, scope: ClubScope) -> Result<Vec<TrainingSession>, DomainError>;

    async fn find(&self, id: TrainingId) -> Result<Option<TrainingSession>, DomainError>;

    /// Resolves a QR check-in token.
    async fn find_by_qr_token(&self, token: &str)
        -> Result<Option<TrainingSession>, DomainError>;

    /// # Errors
    ///
    /// - `ClubNotFound` when the owning club does not exist
    async fn create(&self, session: NewTrainingSession) -> Result<TrainingSession, DomainError>;

    /// # Errors
    ///
    /// - `TrainingNotFound` when the session is missing
    async fn update(
        &self,
        id: TrainingId,
        update: TrainingUpdate,
    ) -> Result<TrainingSession, DomainError>;

    async fn delete(&self, id: TrainingId) -> Result<(), DomainError>;
}
