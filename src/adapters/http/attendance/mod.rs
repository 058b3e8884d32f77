//! Attendance listing and QR check-in.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
