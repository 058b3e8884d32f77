//! Session-cookie authentication middleware and extractors.
//!
//! The middleware reads the session cookie, resolves it through the
//! access resolver, and injects the resulting [`AccessContext`] into
//! request extensions. Handlers opt in with [`RequireAccess`] (401 when
//! absent) or [`OptionalAccess`].
//!
//! A missing or unresolvable cookie is not an error at this layer; the
//! request continues unauthenticated. Resolver failures (database down)
//! do abort the request: authorization never degrades to a guess.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use super::super::{error::ApiError, AppState};
use crate::domain::access::AccessContext;

/// Session cookie settings shared by the middleware and the auth
/// handlers that set and clear the cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub ttl_days: i64,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, ttl_days: i64) -> Self {
        Self {
            name: name.into(),
            ttl_days,
        }
    }

    /// `Set-Cookie` value establishing a session.
    pub fn issue(&self, token: &str, expires_at: DateTime<Utc>) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
            self.name,
            token,
            expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
        )
    }

    /// `Set-Cookie` value removing the session cookie.
    pub fn clear(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.name)
    }

    /// The raw session token from a request's `Cookie` header, if any.
    pub fn token_from(&self, headers: &HeaderMap) -> Option<String> {
        let cookies = headers.get(COOKIE)?.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.name).then(|| value.to_string())
        })
    }
}

/// Resolves the session cookie and injects the access context.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = state.session_cookie.token_from(request.headers());

    if let Some(token) = token {
        match state.access_resolver.resolve(&token).await {
            Ok(Some(access)) => {
                request.extensions_mut().insert(access);
            }
            Ok(None) => {}
            Err(err) => return ApiError::from(err).into_response(),
        }
    }

    next.run(request).await
}

/// Extractor for handlers that require an authenticated caller.
///
/// Rejects with the generic 401 body when no access context was
/// injected, never distinguishing missing, unknown, and expired sessions.
#[derive(Debug, Clone)]
pub struct RequireAccess(pub AccessContext);

impl<S> axum::extract::FromRequestParts<S> for RequireAccess
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AccessContext>()
                .cloned()
                .map(RequireAccess)
                .ok_or_else(ApiError::unauthenticated)
        })
    }
}

/// Extractor for handlers that render differently for signed-out callers.
#[derive(Debug, Clone)]
pub struct OptionalAccess(pub Option<AccessContext>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAccess
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Ok(OptionalAccess(
                parts.extensions.get::<AccessContext>().cloned(),
            ))
        })
    }
}
