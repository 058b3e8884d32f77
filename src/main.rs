//! Service entrypoint: configuration, database pool, wiring, and serve.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use sportcamp::adapters::auth::Argon2PasswordHasher;
use sportcamp::adapters::http::{app_router, AppState, SessionCookie};
use sportcamp::adapters::postgres::{
    PostgresAttendanceRepository, PostgresBillingRunner, PostgresClubRepository,
    PostgresDashboardReader, PostgresJoinRequestRepository, PostgresMembershipRepository,
    PostgresNotificationRepository, PostgresProfileReader, PostgresReportsReader,
    PostgresSessionStore, PostgresSettingsRepository, PostgresSportRepository,
    PostgresTrainingRepository, PostgresUserRepository, PostgresWalletRepository,
};
use sportcamp::application::{AccessResolver, AuthService};
use sportcamp::config::AppConfig;
use sportcamp::ports::PasswordHasher;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // The schedule itself is executed by deployment cron hitting the
    // billing endpoints; log it so a misconfigured deployment is visible
    // next to the serve line.
    tracing::info!(
        schedule = %config.billing.schedule,
        timezone = %config.billing.timezone,
        notify_window_hours = config.billing.notify_window_hours,
        "billing schedule (external cron)"
    );

    let hasher = Arc::new(Argon2PasswordHasher::new());
    bootstrap_superadmin(&config, &pool, hasher.as_ref()).await?;

    let state = build_state(&config, pool, hasher);
    let mut app = app_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
    if let Some(cors) = cors_layer(&config) {
        app = app.layer(cors);
    }

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("sportcamp listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// CORS for cross-origin frontends. Credentials are always allowed
/// because auth rides on the session cookie; that rules out wildcard
/// origins, so no configured origins means no CORS layer at all.
fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}

fn build_state(config: &AppConfig, pool: PgPool, hasher: Arc<Argon2PasswordHasher>) -> AppState {
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let sessions = Arc::new(PostgresSessionStore::new(pool.clone()));
    let memberships = Arc::new(PostgresMembershipRepository::new(pool.clone()));

    let access_resolver = Arc::new(AccessResolver::new(sessions.clone(), memberships.clone()));
    let auth_service = Arc::new(AuthService::new(
        users,
        sessions,
        hasher,
        i64::from(config.auth.session_ttl_days),
    ));
    let session_cookie = SessionCookie::new(
        config.auth.session_cookie_name.clone(),
        i64::from(config.auth.session_ttl_days),
    );

    AppState {
        access_resolver,
        auth_service,
        session_cookie,
        sports: Arc::new(PostgresSportRepository::new(pool.clone())),
        clubs: Arc::new(PostgresClubRepository::new(pool.clone())),
        memberships,
        trainings: Arc::new(PostgresTrainingRepository::new(pool.clone())),
        attendance: Arc::new(PostgresAttendanceRepository::new(pool.clone())),
        wallets: Arc::new(PostgresWalletRepository::new(pool.clone())),
        billing: Arc::new(PostgresBillingRunner::new(pool.clone())),
        settings: Arc::new(PostgresSettingsRepository::new(pool.clone())),
        join_requests: Arc::new(PostgresJoinRequestRepository::new(pool.clone())),
        notifications: Arc::new(PostgresNotificationRepository::new(pool.clone())),
        reports: Arc::new(PostgresReportsReader::new(pool.clone())),
        dashboard: Arc::new(PostgresDashboardReader::new(pool.clone())),
        profile: Arc::new(PostgresProfileReader::new(pool)),
    }
}

/// Provisions the configured superadmin account at startup, idempotently.
async fn bootstrap_superadmin(
    config: &AppConfig,
    pool: &PgPool,
    hasher: &Argon2PasswordHasher,
) -> Result<(), BoxError> {
    let (Some(email), Some(password)) = (
        config.auth.superadmin_email.as_deref(),
        config.auth.superadmin_password.as_deref(),
    ) else {
        return Ok(());
    };

    let password_hash = hasher.hash(password).await?;
    let users = PostgresUserRepository::new(pool.clone());
    sportcamp::ports::UserRepository::ensure_superadmin(&users, email, &password_hash).await?;
    tracing::info!("superadmin account ensured");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
