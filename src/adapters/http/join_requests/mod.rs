//! Club join requests: filing, review, and the approval side effect.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
