//! Membership administration: who belongs to which club, as what.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
