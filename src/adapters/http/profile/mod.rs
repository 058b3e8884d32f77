//! The caller's own profile page.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
