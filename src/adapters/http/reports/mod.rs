//! Reporting endpoints: overview counts, trends, and the CSV export.

pub mod csv;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::routes;
