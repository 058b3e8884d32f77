//! Application services composed from ports.

mod access_resolver;
mod auth_service;

pub use access_resolver::AccessResolver;
pub use auth_service::AuthService;
