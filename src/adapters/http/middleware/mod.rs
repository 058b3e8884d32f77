//! HTTP middleware: session-cookie authentication.

pub mod auth;

pub use auth::{auth_middleware, OptionalAccess, RequireAccess, SessionCookie};
