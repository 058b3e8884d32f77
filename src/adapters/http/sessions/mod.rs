//! Training session scheduling, QR lookup, and per-session attendance.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
