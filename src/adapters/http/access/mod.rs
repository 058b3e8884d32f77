//! The access endpoint: who is calling and what may they see.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
