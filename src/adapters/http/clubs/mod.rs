//! Club administration and the join-request catalog.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
