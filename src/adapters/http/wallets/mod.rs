//! Wallet listing, manual ledger entries, and the bulk monthly charge.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
