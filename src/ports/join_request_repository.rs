//! Club join request persistence port.

use async_trait::async_trait;

use super::ClubScope;
use crate::domain::foundation::{ClubId, DomainError, JoinRequestId, UserId};
use crate::domain::join_request::{JoinRequest, JoinRequestStatus};

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    /// Requests visible under the scope, newest first.
    async fn list(&self, scope: ClubScope) -> Result<Vec<JoinRequest>, DomainError>;

    /// The caller's own requests, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<JoinRequest>, DomainError>;

    async fn find(&self, id: JoinRequestId) -> Result<Option<JoinRequest>, DomainError>;

    /// Files a request with status `pending`.
    ///
    /// # Errors
    ///
    /// - `ClubNotFound` when the club does not exist
    async fn create(
        &self,
        club_id: ClubId,
        user_id: UserId,
        note: Option<&str>,
    ) -> Result<JoinRequest, DomainError>;

    /// Moves the request to `status`.
    ///
    /// # Errors
    ///
    /// - `JoinRequestNotFound` when the row is missing
    async fn set_status(
        &self,
        id: JoinRequestId,
        status: JoinRequestStatus,
    ) -> Result<JoinRequest, DomainError>;
}
