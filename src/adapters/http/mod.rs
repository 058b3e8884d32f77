//! HTTP adapters - the axum REST surface.
//!
//! One module per resource, each with `dto.rs` / `handlers.rs` /
//! `routes.rs`. Everything shares one [`AppState`] and the session-cookie
//! auth middleware; errors funnel through [`error::ApiError`].

pub mod error;
pub mod middleware;

pub mod access;
pub mod attendance;
pub mod auth;
pub mod billing;
pub mod clubs;
pub mod dashboard;
pub mod join_requests;
pub mod memberships;
pub mod notifications;
pub mod profile;
pub mod reports;
pub mod sessions;
pub mod settings;
pub mod sports;
pub mod wallets;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::application::{AccessResolver, AuthService};
use crate::ports::{
    AttendanceRepository, BillingRunner, ClubRepository, DashboardReader, JoinRequestRepository,
    MembershipRepository, NotificationRepository, ProfileReader, ReportsReader,
    SettingsRepository, SportRepository, TrainingRepository, WalletRepository,
};

pub use error::ApiError;
pub use middleware::{auth_middleware, OptionalAccess, RequireAccess, SessionCookie};

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub access_resolver: Arc<AccessResolver>,
    pub auth_service: Arc<AuthService>,
    pub session_cookie: SessionCookie,

    pub sports: Arc<dyn SportRepository>,
    pub clubs: Arc<dyn ClubRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub trainings: Arc<dyn TrainingRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub wallets: Arc<dyn WalletRepository>,
    pub billing: Arc<dyn BillingRunner>,
    pub settings: Arc<dyn SettingsRepository>,
    pub join_requests: Arc<dyn JoinRequestRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub reports: Arc<dyn ReportsReader>,
    pub dashboard: Arc<dyn DashboardReader>,
    pub profile: Arc<dyn ProfileReader>,
}

/// Assembles the full `/api` router with auth middleware and tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth::routes())
        .nest("/api/access", access::routes())
        .nest("/api/sports", sports::routes())
        .nest("/api/clubs", clubs::routes())
        .nest("/api/memberships", memberships::routes())
        .nest("/api/sessions", sessions::routes())
        .nest("/api/attendance", attendance::routes())
        .nest("/api/wallets", wallets::routes())
        .nest("/api/billing-runs", billing::routes())
        .nest("/api/settings", settings::routes())
        .nest("/api/join-requests", join_requests::routes())
        .nest("/api/notifications", notifications::routes())
        .nest("/api/reports", reports::routes())
        .nest("/api/dashboard", dashboard::routes())
        .nest("/api/profile", profile::routes())
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
