//! Signup, login, logout, and the current-user endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
