//! Integration tests for the HTTP surface.
//!
//! The full router is wired against in-memory port implementations, so
//! these tests exercise routing, the auth middleware, extractors, and
//! handler behavior end to end without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use sportcamp::adapters::http::{app_router, AppState, SessionCookie};
use sportcamp::application::{AccessResolver, AuthService};
use sportcamp::domain::access::{ClubAccess, ClubRole};
use sportcamp::domain::billing::{BillingRun, MonthlyOutcome, RegistrationOutcome};
use sportcamp::domain::club::{Club, Sport};
use sportcamp::domain::foundation::{
    ClubId, DomainError, ErrorCode, JoinRequestId, MembershipId, NotificationId, SessionId,
    SportId, TrainingId, UserId, WalletId,
};
use sportcamp::domain::join_request::{JoinRequest, JoinRequestStatus};
use sportcamp::domain::membership::Membership;
use sportcamp::domain::settings::AppSettings;
use sportcamp::domain::training::TrainingSession;
use sportcamp::domain::user::{Profile, StoredCredentials, UserSession};
use sportcamp::domain::wallet::{TransactionReason, Wallet};
use sportcamp::ports::{
    AttendanceRecord, AttendanceRepository, AttendanceScope, AttendanceSummary, BillingRunner,
    ClubRepository, ClubScope, ClubUpdate, DashboardReader, DashboardSnapshot,
    JoinRequestRepository, MembershipRepository, NewTrainingSession, NewUser, NotificationFilter,
    NotificationPage, NotificationRepository, PasswordHasher, ProfileOverview, ProfileReader,
    ReportOverview, ReportsReader, SessionStore, SettingsRepository, SportRepository,
    SportWithClubCount, TrainingRepository, TrainingUpdate, Trends, UserRepository,
    WalletRepository,
};

// ═════════════════════════════════ world ════════════════════════════════════

/// Shared in-memory backing store. The port wrappers below all point at
/// the same `World` so flows that span ports (signup then me, membership
/// then check-in) observe each other's writes.
#[derive(Default)]
struct World {
    users: Mutex<Vec<(Profile, String)>>,
    sessions: Mutex<HashMap<SessionId, UserSession>>,
    memberships: Mutex<Vec<(UserId, ClubAccess)>>,
    trainings: Mutex<Vec<TrainingSession>>,
    attendance: Mutex<Vec<(TrainingId, UserId)>>,
    join_requests: Mutex<Vec<JoinRequest>>,
    settings: Mutex<AppSettings>,
    billed_fees: Mutex<Vec<Decimal>>,
}

impl World {
    fn add_user(&self, email: &str, is_superadmin: bool) -> UserId {
        let profile = Profile {
            id: UserId::new(),
            email: email.to_string(),
            full_name: Some(email.split('@').next().unwrap_or("user").to_string()),
            phone: None,
            is_superadmin,
            created_at: Utc::now(),
        };
        let id = profile.id;
        self.users
            .lock()
            .unwrap()
            .push((profile, "hashed:password".to_string()));
        id
    }

    fn open_session(&self, user_id: UserId) -> SessionId {
        let session = UserSession {
            id: SessionId::new(),
            user_id,
            expires_at: Utc::now() + Duration::days(14),
        };
        let id = session.id;
        self.sessions.lock().unwrap().insert(id, session);
        id
    }

    fn join_club(&self, user_id: UserId, club: &ClubAccess) {
        self.memberships
            .lock()
            .unwrap()
            .push((user_id, club.clone()));
    }

    fn add_training(&self, club: &ClubAccess, qr_token: &str) -> TrainingId {
        let session = TrainingSession {
            id: TrainingId::new(),
            club_id: club.id,
            club_name: club.name.clone(),
            sport_id: SportId::new(),
            sport_name: club.sport.clone().unwrap_or_default(),
            coach_id: None,
            coach_name: None,
            title: "Evening practice".to_string(),
            starts_at: Utc::now() + Duration::hours(2),
            location: None,
            capacity: None,
            qr_token: qr_token.to_string(),
            created_at: Utc::now(),
        };
        let id = session.id;
        self.trainings.lock().unwrap().push(session);
        id
    }

    fn file_join_request(&self, club: &ClubAccess, user_id: UserId) -> JoinRequestId {
        let request = JoinRequest {
            id: JoinRequestId::new(),
            club_id: club.id,
            club_name: club.name.clone(),
            user_id,
            user_email: "applicant@example.com".to_string(),
            user_full_name: None,
            status: JoinRequestStatus::Pending,
            note: None,
            created_at: Utc::now(),
        };
        let id = request.id;
        self.join_requests.lock().unwrap().push(request);
        id
    }
}

fn club_access(name: &str, role: ClubRole) -> ClubAccess {
    ClubAccess {
        id: ClubId::new(),
        name: name.to_string(),
        sport: Some("Swimming".to_string()),
        role,
    }
}

// ═══════════════════════════ port implementations ═══════════════════════════

struct Users(Arc<World>);

#[async_trait]
impl UserRepository for Users {
    async fn create(&self, user: NewUser) -> Result<Profile, DomainError> {
        let mut users = self.0.users.lock().unwrap();
        if users.iter().any(|(p, _)| p.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email already registered.",
            ));
        }
        let profile = Profile {
            id: UserId::new(),
            email: user.email,
            full_name: user.full_name,
            phone: None,
            is_superadmin: false,
            created_at: Utc::now(),
        };
        users.push((profile.clone(), user.password_hash));
        Ok(profile)
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(Profile, StoredCredentials)>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.email == email)
            .map(|(p, hash)| {
                (
                    p.clone(),
                    StoredCredentials {
                        user_id: p.id,
                        password_hash: hash.clone(),
                    },
                )
            }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone()))
    }

    async fn ensure_superadmin(
        &self,
        _email: &str,
        _password_hash: &str,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

struct Sessions(Arc<World>);

#[async_trait]
impl SessionStore for Sessions {
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSession, DomainError> {
        let session = UserSession {
            id: SessionId::new(),
            user_id,
            expires_at,
        };
        self.0
            .sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_user(&self, session_id: SessionId) -> Result<Option<Profile>, DomainError> {
        let user_id = match self.0.sessions.lock().unwrap().get(&session_id) {
            Some(session) if !session.is_expired(Utc::now()) => session.user_id,
            _ => return Ok(None),
        };
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == user_id)
            .map(|(p, _)| p.clone()))
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), DomainError> {
        self.0.sessions.lock().unwrap().remove(&session_id);
        Ok(())
    }
}

struct Hasher;

#[async_trait]
impl PasswordHasher for Hasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

struct Memberships(Arc<World>);

#[async_trait]
impl MembershipRepository for Memberships {
    async fn clubs_of(&self, user_id: UserId) -> Result<Vec<ClubAccess>, DomainError> {
        Ok(self
            .0
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .map(|(_, club)| club.clone())
            .collect())
    }

    async fn club_role_of(
        &self,
        user_id: UserId,
        club_id: ClubId,
    ) -> Result<Option<ClubRole>, DomainError> {
        Ok(self
            .0
            .memberships
            .lock()
            .unwrap()
            .iter()
            .find(|(uid, club)| *uid == user_id && club.id == club_id)
            .map(|(_, club)| club.role))
    }

    async fn list(&self, _scope: ClubScope) -> Result<Vec<Membership>, DomainError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(None)
    }

    async fn create(
        &self,
        club_id: ClubId,
        user_id: UserId,
        role: ClubRole,
    ) -> Result<Membership, DomainError> {
        Ok(Membership {
            id: MembershipId::new(),
            club_id,
            club_name: "Club".to_string(),
            user_id,
            user_email: "member@example.com".to_string(),
            user_full_name: None,
            role,
            created_at: Utc::now(),
        })
    }

    async fn update_role(
        &self,
        _id: MembershipId,
        _role: ClubRole,
    ) -> Result<Membership, DomainError> {
        Err(DomainError::new(
            ErrorCode::MembershipNotFound,
            "Membership not found.",
        ))
    }

    async fn delete(&self, _id: MembershipId) -> Result<(), DomainError> {
        Ok(())
    }

    async fn ensure_student(&self, club_id: ClubId, user_id: UserId) -> Result<(), DomainError> {
        let already = self
            .0
            .memberships
            .lock()
            .unwrap()
            .iter()
            .any(|(uid, club)| *uid == user_id && club.id == club_id);
        if !already {
            let mut club = club_access("Club", ClubRole::Student);
            club.id = club_id;
            self.0.join_club(user_id, &club);
        }
        Ok(())
    }
}

struct Trainings(Arc<World>);

#[async_trait]
impl TrainingRepository for Trainings {
    async fn list(&self, _scope: ClubScope) -> Result<Vec<TrainingSession>, DomainError> {
        Ok(self.0.trainings.lock().unwrap().clone())
    }

    async fn find(&self, id: TrainingId) -> Result<Option<TrainingSession>, DomainError> {
        Ok(self
            .0
            .trainings
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_qr_token(
        &self,
        token: &str,
    ) -> Result<Option<TrainingSession>, DomainError> {
        Ok(self
            .0
            .trainings
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.qr_token == token)
            .cloned())
    }

    async fn create(&self, _session: NewTrainingSession) -> Result<TrainingSession, DomainError> {
        Err(DomainError::new(ErrorCode::ClubNotFound, "Club not found."))
    }

    async fn update(
        &self,
        _id: TrainingId,
        _update: TrainingUpdate,
    ) -> Result<TrainingSession, DomainError> {
        Err(DomainError::new(
            ErrorCode::TrainingNotFound,
            "Session not found.",
        ))
    }

    async fn delete(&self, _id: TrainingId) -> Result<(), DomainError> {
        Ok(())
    }
}

struct Attendance(Arc<World>);

#[async_trait]
impl AttendanceRepository for Attendance {
    async fn list(
        &self,
        _scope: AttendanceScope,
        _limit: i64,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn list_for_session(
        &self,
        _session_id: TrainingId,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn check_in(
        &self,
        session_id: TrainingId,
        student_id: UserId,
    ) -> Result<(), DomainError> {
        let mut rows = self.0.attendance.lock().unwrap();
        if !rows.contains(&(session_id, student_id)) {
            rows.push((session_id, student_id));
        }
        Ok(())
    }
}

struct Sports;

#[async_trait]
impl SportRepository for Sports {
    async fn list(&self) -> Result<Vec<SportWithClubCount>, DomainError> {
        Ok(Vec::new())
    }

    async fn create(&self, name: &str, created_by: UserId) -> Result<Sport, DomainError> {
        Ok(Sport {
            id: SportId::new(),
            name: name.to_string(),
            created_by: Some(created_by),
            created_at: Utc::now(),
        })
    }

    async fn rename(&self, _id: SportId, _name: &str) -> Result<Sport, DomainError> {
        Err(DomainError::new(ErrorCode::SportNotFound, "Sport not found."))
    }

    async fn delete(&self, _id: SportId) -> Result<(), DomainError> {
        Ok(())
    }
}

struct Clubs;

#[async_trait]
impl ClubRepository for Clubs {
    async fn list(&self, _scope: ClubScope) -> Result<Vec<Club>, DomainError> {
        Ok(Vec::new())
    }

    async fn catalog(&self) -> Result<Vec<Club>, DomainError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: ClubId) -> Result<Option<Club>, DomainError> {
        Ok(None)
    }

    async fn create(
        &self,
        _name: &str,
        _sport_id: SportId,
        _created_by: UserId,
    ) -> Result<Club, DomainError> {
        Err(DomainError::new(ErrorCode::SportNotFound, "Sport not found."))
    }

    async fn update(&self, _id: ClubId, _update: ClubUpdate) -> Result<Club, DomainError> {
        Err(DomainError::new(ErrorCode::ClubNotFound, "Club not found."))
    }

    async fn delete(&self, _id: ClubId) -> Result<(), DomainError> {
        Ok(())
    }
}

struct Wallets;

#[async_trait]
impl WalletRepository for Wallets {
    async fn list(&self, _scope: ClubScope) -> Result<Vec<Wallet>, DomainError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: WalletId) -> Result<Option<Wallet>, DomainError> {
        Ok(None)
    }

    async fn list_transactions(
        &self,
        _scope: ClubScope,
        _limit: i64,
    ) -> Result<Vec<sportcamp::ports::TransactionRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn post_transaction(
        &self,
        _wallet_id: WalletId,
        _amount: Decimal,
        _reason: TransactionReason,
        _note: Option<&str>,
        _created_by: Option<UserId>,
    ) -> Result<sportcamp::domain::foundation::TransactionId, DomainError> {
        Err(DomainError::new(
            ErrorCode::WalletNotFound,
            "Wallet not found.",
        ))
    }

    async fn debit_all(
        &self,
        _scope: ClubScope,
        _fee: Decimal,
        _note: &str,
        _created_by: UserId,
    ) -> Result<i64, DomainError> {
        Ok(0)
    }
}

struct Billing(Arc<World>);

#[async_trait]
impl BillingRunner for Billing {
    async fn run_monthly(
        &self,
        fee: Decimal,
        _run_month: chrono::NaiveDate,
    ) -> Result<MonthlyOutcome, DomainError> {
        self.0.billed_fees.lock().unwrap().push(fee);
        Ok(MonthlyOutcome::AlreadyCharged)
    }

    async fn run_registration(&self, fee: Decimal) -> Result<RegistrationOutcome, DomainError> {
        self.0.billed_fees.lock().unwrap().push(fee);
        Ok(RegistrationOutcome::Charged {
            charged: 0,
            skipped: 0,
        })
    }

    async fn latest_run(&self) -> Result<Option<BillingRun>, DomainError> {
        Ok(None)
    }

    async fn month_billed(&self, _run_month: chrono::NaiveDate) -> Result<bool, DomainError> {
        Ok(false)
    }
}

struct Settings(Arc<World>);

#[async_trait]
impl SettingsRepository for Settings {
    async fn get(&self) -> Result<AppSettings, DomainError> {
        Ok(*self.0.settings.lock().unwrap())
    }

    async fn update(
        &self,
        registration_fee: Decimal,
        monthly_fee: Decimal,
    ) -> Result<AppSettings, DomainError> {
        let settings = AppSettings {
            registration_fee: Some(registration_fee),
            monthly_fee: Some(monthly_fee),
        };
        *self.0.settings.lock().unwrap() = settings;
        Ok(settings)
    }
}

struct JoinRequests(Arc<World>);

#[async_trait]
impl JoinRequestRepository for JoinRequests {
    async fn list(&self, _scope: ClubScope) -> Result<Vec<JoinRequest>, DomainError> {
        Ok(self.0.join_requests.lock().unwrap().clone())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<JoinRequest>, DomainError> {
        Ok(self
            .0
            .join_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: JoinRequestId) -> Result<Option<JoinRequest>, DomainError> {
        Ok(self
            .0
            .join_requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn create(
        &self,
        club_id: ClubId,
        user_id: UserId,
        note: Option<&str>,
    ) -> Result<JoinRequest, DomainError> {
        let request = JoinRequest {
            id: JoinRequestId::new(),
            club_id,
            club_name: "Club".to_string(),
            user_id,
            user_email: "member@example.com".to_string(),
            user_full_name: None,
            status: JoinRequestStatus::Pending,
            note: note.map(str::to_string),
            created_at: Utc::now(),
        };
        self.0.join_requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn set_status(
        &self,
        id: JoinRequestId,
        status: JoinRequestStatus,
    ) -> Result<JoinRequest, DomainError> {
        let mut requests = self.0.join_requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::JoinRequestNotFound, "Request not found.")
            })?;
        request.status = status;
        Ok(request.clone())
    }
}

struct Notifications;

#[async_trait]
impl NotificationRepository for Notifications {
    async fn list(
        &self,
        _user_id: UserId,
        _filter: NotificationFilter,
    ) -> Result<NotificationPage, DomainError> {
        Ok(NotificationPage {
            notifications: Vec::new(),
            unread_count: 0,
        })
    }

    async fn mark_read(
        &self,
        _user_id: UserId,
        ids: &[NotificationId],
    ) -> Result<i64, DomainError> {
        Ok(ids.len() as i64)
    }

    async fn mark_all_read(&self, _user_id: UserId) -> Result<i64, DomainError> {
        Ok(3)
    }
}

struct Reports;

#[async_trait]
impl ReportsReader for Reports {
    async fn overview(
        &self,
        _scope: ClubScope,
        _days: i64,
    ) -> Result<ReportOverview, DomainError> {
        Ok(ReportOverview {
            sessions: 2,
            attendance: 5,
            wallets_total: Decimal::ZERO,
            clubs: 1,
        })
    }

    async fn trends(&self, _scope: ClubScope, _days: i64) -> Result<Trends, DomainError> {
        Ok(Trends {
            by_sport: Vec::new(),
            by_coach: Vec::new(),
        })
    }

    async fn export_rows(
        &self,
        _scope: ClubScope,
        _days: i64,
    ) -> Result<Vec<sportcamp::ports::ExportRow>, DomainError> {
        Ok(Vec::new())
    }
}

struct Dashboard;

#[async_trait]
impl DashboardReader for Dashboard {
    async fn snapshot(&self, _scope: ClubScope) -> Result<DashboardSnapshot, DomainError> {
        Ok(DashboardSnapshot {
            student_count: 0,
            sessions_last_7_days: 0,
            wallets_total: Decimal::ZERO,
            recent_attendance: Vec::new(),
            recent_movements: Vec::new(),
        })
    }
}

struct Profiles(Arc<World>);

#[async_trait]
impl ProfileReader for Profiles {
    async fn overview(&self, user_id: UserId) -> Result<ProfileOverview, DomainError> {
        let profile = self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == user_id)
            .map(|(p, _)| p.clone())
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found."))?;
        Ok(ProfileOverview {
            profile,
            wallets: Vec::new(),
            attendance: AttendanceSummary {
                total: 0,
                recent: 0,
                last_seen: None,
            },
        })
    }
}

// ════════════════════════════════ harness ═══════════════════════════════════

fn test_app(world: Arc<World>) -> axum::Router {
    let sessions = Arc::new(Sessions(world.clone()));
    let memberships = Arc::new(Memberships(world.clone()));
    let users = Arc::new(Users(world.clone()));

    let state = AppState {
        access_resolver: Arc::new(AccessResolver::new(sessions.clone(), memberships.clone())),
        auth_service: Arc::new(AuthService::new(users, sessions, Arc::new(Hasher), 14)),
        session_cookie: SessionCookie::new("sportcamp_session", 14),
        sports: Arc::new(Sports),
        clubs: Arc::new(Clubs),
        memberships,
        trainings: Arc::new(Trainings(world.clone())),
        attendance: Arc::new(Attendance(world.clone())),
        wallets: Arc::new(Wallets),
        billing: Arc::new(Billing(world.clone())),
        settings: Arc::new(Settings(world.clone())),
        join_requests: Arc::new(JoinRequests(world.clone())),
        notifications: Arc::new(Notifications),
        reports: Arc::new(Reports),
        dashboard: Arc::new(Dashboard),
        profile: Arc::new(Profiles(world)),
    };
    app_router(state)
}

fn get(uri: &str, session: Option<SessionId>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, format!("sportcamp_session={session}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, session: Option<SessionId>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, format!("sportcamp_session={session}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ═══════════════════════════════ auth flows ═════════════════════════════════

#[tokio::test]
async fn access_reports_signed_out_without_a_cookie() {
    let app = test_app(Arc::new(World::default()));

    let response = app.oneshot(get("/api/access", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "signed-out");
}

#[tokio::test]
async fn signup_sets_a_session_cookie_and_me_returns_the_user() {
    let world = Arc::new(World::default());
    let app = test_app(world.clone());

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/auth/signup",
            None,
            json!({ "email": "alice@example.com", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("signup sets the session cookie")
        .to_string();
    assert!(cookie.starts_with("sportcamp_session="));
    let token = cookie
        .trim_start_matches("sportcamp_session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");

    let session: SessionId = token.parse().unwrap();
    let response = app.oneshot(get("/api/auth/me", Some(session))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn me_returns_null_user_when_signed_out() {
    let app = test_app(Arc::new(World::default()));

    let response = app.oneshot(get("/api/auth/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn login_with_a_wrong_password_is_generic_401() {
    let world = Arc::new(World::default());
    world.add_user("bob@example.com", false);
    let app = test_app(world);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "bob@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password.");
}

// ═══════════════════════════════ authorization ══════════════════════════════

#[tokio::test]
async fn protected_endpoints_reject_anonymous_callers() {
    let app = test_app(Arc::new(World::default()));

    for uri in ["/api/sessions", "/api/wallets", "/api/reports", "/api/profile"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized.");
    }
}

#[tokio::test]
async fn sport_creation_is_superadmin_only() {
    let world = Arc::new(World::default());
    let user = world.add_user("admin@example.com", false);
    world.join_club(user, &club_access("Dolphins", ClubRole::Admin));
    let session = world.open_session(user);
    let app = test_app(world);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/sports",
            Some(session),
            json!({ "name": "Judo" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Forbidden.");
}

#[tokio::test]
async fn superadmin_creates_a_sport() {
    let world = Arc::new(World::default());
    let root = world.add_user("root@example.com", true);
    let session = world.open_session(root);
    let app = test_app(world);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/sports",
            Some(session),
            json!({ "name": "  Judo  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sport"]["name"], "Judo");
}

#[tokio::test]
async fn billing_run_is_superadmin_only() {
    let world = Arc::new(World::default());
    let user = world.add_user("admin@example.com", false);
    world.join_club(user, &club_access("Dolphins", ClubRole::Admin));
    let session = world.open_session(user);
    let app = test_app(world);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/billing-runs/run",
            Some(session),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn zero_fees_are_treated_as_not_configured_by_the_billing_run() {
    let world = Arc::new(World::default());
    *world.settings.lock().unwrap() = AppSettings {
        registration_fee: Some(Decimal::ZERO),
        monthly_fee: Some(Decimal::ZERO),
    };
    let root = world.add_user("root@example.com", true);
    let session = world.open_session(root);
    let app = test_app(world.clone());

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/billing-runs/run",
            Some(session),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["monthly"]["ran"], false);
    assert_eq!(body["monthly"]["reason"], "Monthly fee not configured.");
    assert_eq!(body["registration"]["ran"], false);
    assert_eq!(
        body["registration"]["reason"],
        "Registration fee not configured."
    );
    assert!(world.billed_fees.lock().unwrap().is_empty());
}

// ═══════════════════════════════ qr check-in ════════════════════════════════

#[tokio::test]
async fn student_checks_in_with_a_qr_token() {
    let world = Arc::new(World::default());
    let club = club_access("Dolphins", ClubRole::Student);
    let student = world.add_user("student@example.com", false);
    world.join_club(student, &club);
    let training = world.add_training(&club, "tok-abc123");
    let session = world.open_session(student);
    let app = test_app(world.clone());

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            Some(session),
            json!({ "token": "tok-abc123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["sessionId"], training.to_string());
    assert_eq!(world.attendance.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn coaches_cannot_check_in() {
    let world = Arc::new(World::default());
    let club = club_access("Dolphins", ClubRole::Coach);
    let coach = world.add_user("coach@example.com", false);
    world.join_club(coach, &club);
    world.add_training(&club, "tok-abc123");
    let session = world.open_session(coach);
    let app = test_app(world.clone());

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            Some(session),
            json!({ "token": "tok-abc123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Only students can check in.");
    assert!(world.attendance.lock().unwrap().is_empty());
}

#[tokio::test]
async fn check_in_requires_a_token() {
    let world = Arc::new(World::default());
    let student = world.add_user("student@example.com", false);
    world.join_club(student, &club_access("Dolphins", ClubRole::Student));
    let session = world.open_session(student);
    let app = test_app(world);

    let response = app
        .oneshot(send_json("POST", "/api/attendance", Some(session), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "QR token required.");
}

#[tokio::test]
async fn check_in_with_an_unknown_token_is_404() {
    let world = Arc::new(World::default());
    let student = world.add_user("student@example.com", false);
    world.join_club(student, &club_access("Dolphins", ClubRole::Student));
    let session = world.open_session(student);
    let app = test_app(world);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            Some(session),
            json!({ "token": "no-such-token" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Session not found.");
}

#[tokio::test]
async fn repeated_check_ins_stay_idempotent() {
    let world = Arc::new(World::default());
    let club = club_access("Dolphins", ClubRole::Student);
    let student = world.add_user("student@example.com", false);
    world.join_club(student, &club);
    world.add_training(&club, "tok-abc123");
    let session = world.open_session(student);
    let app = test_app(world.clone());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/attendance",
                Some(session),
                json!({ "token": "tok-abc123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(world.attendance.lock().unwrap().len(), 1);
}

// ═══════════════════════════════ join requests ══════════════════════════════

#[tokio::test]
async fn approving_a_join_request_creates_a_student_membership() {
    let world = Arc::new(World::default());
    let club = club_access("Dolphins", ClubRole::Admin);
    let admin = world.add_user("admin@example.com", false);
    world.join_club(admin, &club);
    let applicant = world.add_user("applicant@example.com", false);
    let request = world.file_join_request(&club, applicant);
    let session = world.open_session(admin);
    let app = test_app(world.clone());

    let response = app
        .oneshot(send_json(
            "PATCH",
            &format!("/api/join-requests/{request}"),
            Some(session),
            json!({ "status": "approved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);

    assert_eq!(
        world.join_requests.lock().unwrap()[0].status,
        JoinRequestStatus::Approved
    );
    let memberships = world.memberships.lock().unwrap();
    assert!(memberships
        .iter()
        .any(|(uid, c)| *uid == applicant && c.id == club.id && c.role == ClubRole::Student));
}

#[tokio::test]
async fn reviewing_with_an_unknown_status_is_rejected() {
    let world = Arc::new(World::default());
    let club = club_access("Dolphins", ClubRole::Admin);
    let admin = world.add_user("admin@example.com", false);
    world.join_club(admin, &club);
    let applicant = world.add_user("applicant@example.com", false);
    let request = world.file_join_request(&club, applicant);
    let session = world.open_session(admin);
    let app = test_app(world.clone());

    let response = app
        .oneshot(send_json(
            "PATCH",
            &format!("/api/join-requests/{request}"),
            Some(session),
            json!({ "status": "maybe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid status.");
    assert!(world.memberships.lock().unwrap().iter().all(|(uid, _)| *uid != applicant));
}

#[tokio::test]
async fn reviewing_someone_elses_club_is_forbidden() {
    let world = Arc::new(World::default());
    let club = club_access("Dolphins", ClubRole::Admin);
    let applicant = world.add_user("applicant@example.com", false);
    let request = world.file_join_request(&club, applicant);
    let outsider = world.add_user("other-admin@example.com", false);
    world.join_club(outsider, &club_access("Sharks", ClubRole::Admin));
    let session = world.open_session(outsider);
    let app = test_app(world.clone());

    let response = app
        .oneshot(send_json(
            "PATCH",
            &format!("/api/join-requests/{request}"),
            Some(session),
            json!({ "status": "approved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        world.join_requests.lock().unwrap()[0].status,
        JoinRequestStatus::Pending
    );
}

// ═══════════════════════════ misc endpoint behavior ═════════════════════════

#[tokio::test]
async fn marking_notifications_read_requires_a_selection() {
    let world = Arc::new(World::default());
    let user = world.add_user("student@example.com", false);
    let session = world.open_session(user);
    let app = test_app(world);

    let response = app
        .oneshot(send_json(
            "PATCH",
            "/api/notifications",
            Some(session),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No notifications selected.");
}

#[tokio::test]
async fn reports_overview_is_flat_counts() {
    let world = Arc::new(World::default());
    let user = world.add_user("student@example.com", false);
    world.join_club(user, &club_access("Dolphins", ClubRole::Student));
    let session = world.open_session(user);
    let app = test_app(world);

    let response = app.oneshot(get("/api/reports", Some(session))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sessions"], 2);
    assert_eq!(body["attendance"], 5);
    assert_eq!(body["clubs"], 1);
}

#[tokio::test]
async fn csv_export_carries_the_header_and_attachment_disposition() {
    let world = Arc::new(World::default());
    let root = world.add_user("root@example.com", true);
    let session = world.open_session(root);
    let app = test_app(world);

    let response = app
        .oneshot(get("/api/reports/export", Some(session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"reports-"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Session ID,Title,Sport,Club,Coach,Starts At,Attendance Count"));
}

#[tokio::test]
async fn profile_reflects_the_callers_memberships() {
    let world = Arc::new(World::default());
    let user = world.add_user("student@example.com", false);
    world.join_club(user, &club_access("Dolphins", ClubRole::Student));
    let session = world.open_session(user);
    let app = test_app(world);

    let response = app.oneshot(get("/api/profile", Some(session))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "student@example.com");
    assert_eq!(body["user"]["role"], "student");
    assert_eq!(body["clubs"][0]["name"], "Dolphins");
    assert_eq!(body["attendanceSummary"]["total"], 0);
}

#[tokio::test]
async fn settings_update_is_superadmin_only_and_validates_fees() {
    let world = Arc::new(World::default());
    let root = world.add_user("root@example.com", true);
    let session = world.open_session(root);
    let app = test_app(world.clone());

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            "/api/settings",
            Some(session),
            json!({ "registrationFee": -5, "monthlyFee": 70 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid fees.");

    let response = app
        .oneshot(send_json(
            "PATCH",
            "/api/settings",
            Some(session),
            json!({ "registrationFee": 30, "monthlyFee": 70 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["settings"]["monthlyFee"], "70");
}
