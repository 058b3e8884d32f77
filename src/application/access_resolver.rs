//! The access resolver: session token in, scoped identity out.

use std::sync::Arc;

use crate::domain::access::{effective_role, user_label, AccessContext, ClubRole, Role};
use crate::domain::foundation::{ClubId, DomainError, SessionId, UserId};
use crate::ports::{MembershipRepository, SessionStore};

/// Resolves a session token to the caller's [`AccessContext`] and answers
/// per-club role checks.
///
/// Resolution fails closed: database errors propagate instead of
/// degrading to an unauthenticated (let alone permissive) result.
pub struct AccessResolver {
    sessions: Arc<dyn SessionStore>,
    memberships: Arc<dyn MembershipRepository>,
}

impl AccessResolver {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            sessions,
            memberships,
        }
    }

    /// Resolves an opaque cookie value to an access context.
    ///
    /// `None` covers every unauthenticated case alike: malformed token,
    /// unknown session, expired session.
    ///
    /// Superadmins come back with `clubs = []`; downstream handlers grant
    /// them implicit access everywhere. Everyone else gets their
    /// membership list (ordered by club name) collapsed into the coarse
    /// effective role, defaulting to `Student` when they have no
    /// memberships at all.
    pub async fn resolve(&self, token: &str) -> Result<Option<AccessContext>, DomainError> {
        let session_id: SessionId = match token.parse() {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };

        let profile = match self.sessions.find_user(session_id).await? {
            Some(profile) => profile,
            None => return Ok(None),
        };

        let label = user_label(profile.full_name.as_deref(), &profile.email);

        if profile.is_superadmin {
            return Ok(Some(AccessContext {
                user_id: profile.id,
                user_label: label,
                role: Role::Superadmin,
                clubs: Vec::new(),
                is_superadmin: true,
            }));
        }

        let clubs = self.memberships.clubs_of(profile.id).await?;
        let role = effective_role(&clubs, false);

        Ok(Some(AccessContext {
            user_id: profile.id,
            user_label: label,
            role,
            clubs,
            is_superadmin: false,
        }))
    }

    /// The caller's current role in one club, read fresh from storage.
    ///
    /// The coarse effective role is not sufficient authorization for
    /// club-scoped mutations; handlers call this to verify the actual
    /// membership row for the target club.
    pub async fn club_role_of(
        &self,
        user_id: UserId,
        club_id: ClubId,
    ) -> Result<Option<ClubRole>, DomainError> {
        self.memberships.club_role_of(user_id, club_id).await
    }

    /// Requires the caller to hold one of `allowed` in `club_id`.
    /// Superadmins pass unconditionally; everyone else fails closed with
    /// `Forbidden` when their row is missing or outside the set.
    pub async fn require_club_role(
        &self,
        access: &AccessContext,
        club_id: ClubId,
        allowed: &[ClubRole],
    ) -> Result<(), DomainError> {
        if access.is_superadmin {
            return Ok(());
        }
        match self.club_role_of(access.user_id, club_id).await? {
            Some(role) if allowed.contains(&role) => Ok(()),
            _ => Err(DomainError::forbidden()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::ClubAccess;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::membership::Membership;
    use crate::domain::user::{Profile, UserSession};
    use crate::ports::ClubScope;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockSessionStore {
        users: Mutex<HashMap<SessionId, Profile>>,
        fail: bool,
    }

    impl MockSessionStore {
        fn with_user(session_id: SessionId, profile: Profile) -> Self {
            let mut users = HashMap::new();
            users.insert(session_id, profile);
            Self {
                users: Mutex::new(users),
                fail: false,
            }
        }

        fn empty() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SessionStore for MockSessionStore {
        async fn create(
            &self,
            user_id: UserId,
            expires_at: DateTime<Utc>,
        ) -> Result<UserSession, DomainError> {
            Ok(UserSession {
                id: SessionId::new(),
                user_id,
                expires_at,
            })
        }

        async fn find_user(
            &self,
            session_id: SessionId,
        ) -> Result<Option<Profile>, DomainError> {
            if self.fail {
                return Err(DomainError::database("connection reset"));
            }
            Ok(self.users.lock().unwrap().get(&session_id).cloned())
        }

        async fn delete(&self, _session_id: SessionId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockMembershipRepository {
        clubs: Mutex<HashMap<UserId, Vec<ClubAccess>>>,
        fail: bool,
    }

    impl MockMembershipRepository {
        fn with_clubs(user_id: UserId, clubs: Vec<ClubAccess>) -> Self {
            let mut map = HashMap::new();
            map.insert(user_id, clubs);
            Self {
                clubs: Mutex::new(map),
                fail: false,
            }
        }

        fn empty() -> Self {
            Self {
                clubs: Mutex::new(HashMap::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                clubs: Mutex::new(HashMap::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl MembershipRepository for MockMembershipRepository {
        async fn clubs_of(&self, user_id: UserId) -> Result<Vec<ClubAccess>, DomainError> {
            if self.fail {
                return Err(DomainError::database("connection reset"));
            }
            Ok(self
                .clubs
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn club_role_of(
            &self,
            user_id: UserId,
            club_id: ClubId,
        ) -> Result<Option<ClubRole>, DomainError> {
            if self.fail {
                return Err(DomainError::database("connection reset"));
            }
            Ok(self
                .clubs
                .lock()
                .unwrap()
                .get(&user_id)
                .and_then(|clubs| clubs.iter().find(|c| c.id == club_id))
                .map(|c| c.role))
        }

        async fn list(&self, _scope: ClubScope) -> Result<Vec<Membership>, DomainError> {
            Ok(Vec::new())
        }

        async fn find(
            &self,
            _id: crate::domain::foundation::MembershipId,
        ) -> Result<Option<Membership>, DomainError> {
            Ok(None)
        }

        async fn create(
            &self,
            _club_id: ClubId,
            _user_id: UserId,
            _role: ClubRole,
        ) -> Result<Membership, DomainError> {
            unimplemented!("not exercised by these tests")
        }

        async fn update_role(
            &self,
            _id: crate::domain::foundation::MembershipId,
            _role: ClubRole,
        ) -> Result<Membership, DomainError> {
            unimplemented!("not exercised by these tests")
        }

        async fn delete(
            &self,
            _id: crate::domain::foundation::MembershipId,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn ensure_student(
            &self,
            _club_id: ClubId,
            _user_id: UserId,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn profile(is_superadmin: bool) -> Profile {
        Profile {
            id: UserId::new(),
            email: "alice@example.com".to_string(),
            full_name: Some("Alice".to_string()),
            phone: None,
            is_superadmin,
            created_at: Utc::now(),
        }
    }

    fn club(name: &str, role: ClubRole) -> ClubAccess {
        ClubAccess {
            id: ClubId::new(),
            name: name.to_string(),
            sport: Some("Swimming".to_string()),
            role,
        }
    }

    fn resolver(
        sessions: MockSessionStore,
        memberships: MockMembershipRepository,
    ) -> AccessResolver {
        AccessResolver::new(Arc::new(sessions), Arc::new(memberships))
    }

    // ═══════════════════════════════ resolve ═══════════════════════════════

    #[tokio::test]
    async fn superadmin_resolves_with_empty_clubs_despite_memberships() {
        let user = profile(true);
        let user_id = user.id;
        let session_id = SessionId::new();
        let resolver = resolver(
            MockSessionStore::with_user(session_id, user),
            MockMembershipRepository::with_clubs(user_id, vec![club("A", ClubRole::Student)]),
        );

        let access = resolver
            .resolve(&session_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(access.role, Role::Superadmin);
        assert!(access.clubs.is_empty());
        assert!(access.is_superadmin);
    }

    #[tokio::test]
    async fn user_without_memberships_resolves_as_student() {
        let user = profile(false);
        let session_id = SessionId::new();
        let resolver = resolver(
            MockSessionStore::with_user(session_id, user),
            MockMembershipRepository::empty(),
        );

        let access = resolver
            .resolve(&session_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(access.role, Role::Student);
        assert!(access.clubs.is_empty());
        assert!(!access.is_superadmin);
    }

    #[tokio::test]
    async fn admin_in_one_club_student_in_another_resolves_as_admin() {
        let user = profile(false);
        let user_id = user.id;
        let session_id = SessionId::new();
        let admin_club = club("Alpha", ClubRole::Admin);
        let student_club = club("Beta", ClubRole::Student);
        let resolver = resolver(
            MockSessionStore::with_user(session_id, user),
            MockMembershipRepository::with_clubs(
                user_id,
                vec![admin_club.clone(), student_club.clone()],
            ),
        );

        let access = resolver
            .resolve(&session_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(access.role, Role::Admin);
        assert_eq!(access.clubs, vec![admin_club, student_club]);
    }

    #[tokio::test]
    async fn unknown_session_resolves_to_none() {
        let resolver = resolver(MockSessionStore::empty(), MockMembershipRepository::empty());
        let access = resolver.resolve(&SessionId::new().to_string()).await.unwrap();
        assert!(access.is_none());
    }

    #[tokio::test]
    async fn malformed_token_resolves_to_none_without_lookup() {
        let resolver = resolver(MockSessionStore::empty(), MockMembershipRepository::empty());
        assert!(resolver.resolve("not-a-uuid").await.unwrap().is_none());
        assert!(resolver.resolve("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn database_error_during_resolution_propagates() {
        let resolver = resolver(MockSessionStore::failing(), MockMembershipRepository::empty());
        let err = resolver
            .resolve(&SessionId::new().to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn membership_lookup_error_propagates() {
        let user = profile(false);
        let session_id = SessionId::new();
        let resolver = resolver(
            MockSessionStore::with_user(session_id, user),
            MockMembershipRepository::failing(),
        );
        let err = resolver
            .resolve(&session_id.to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn user_label_falls_back_to_email() {
        let mut user = profile(false);
        user.full_name = Some("   ".to_string());
        let session_id = SessionId::new();
        let resolver = resolver(
            MockSessionStore::with_user(session_id, user),
            MockMembershipRepository::empty(),
        );

        let access = resolver
            .resolve(&session_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(access.user_label, "alice@example.com");
    }

    // ═══════════════════════════ require_club_role ═════════════════════════

    #[tokio::test]
    async fn superadmin_passes_any_club_role_check() {
        let resolver = resolver(MockSessionStore::empty(), MockMembershipRepository::empty());
        let access = AccessContext {
            user_id: UserId::new(),
            user_label: "Root".to_string(),
            role: Role::Superadmin,
            clubs: vec![],
            is_superadmin: true,
        };
        resolver
            .require_club_role(&access, ClubId::new(), &[ClubRole::Admin])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn club_role_check_uses_the_membership_row_not_the_coarse_role() {
        let user_id = UserId::new();
        let admin_club = club("Alpha", ClubRole::Admin);
        let student_club = club("Beta", ClubRole::Student);
        let target = student_club.id;
        let resolver = resolver(
            MockSessionStore::empty(),
            MockMembershipRepository::with_clubs(user_id, vec![admin_club, student_club]),
        );

        // Coarse role is admin, but the row for the target club says student.
        let access = AccessContext {
            user_id,
            user_label: "Alice".to_string(),
            role: Role::Admin,
            clubs: vec![],
            is_superadmin: false,
        };
        let err = resolver
            .require_club_role(&access, target, &[ClubRole::Admin, ClubRole::Coach])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        resolver
            .require_club_role(&access, target, &[ClubRole::Student])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_membership_row_fails_closed() {
        let resolver = resolver(MockSessionStore::empty(), MockMembershipRepository::empty());
        let access = AccessContext {
            user_id: UserId::new(),
            user_label: "Alice".to_string(),
            role: Role::Admin,
            clubs: vec![],
            is_superadmin: false,
        };
        let err = resolver
            .require_club_role(&access, ClubId::new(), &[ClubRole::Admin])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
