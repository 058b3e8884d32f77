//! Billing runs: the idempotent monthly settlement and the one-time
//! registration charge.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
