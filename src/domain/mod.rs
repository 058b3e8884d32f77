//! Domain layer: pure types and logic, free of HTTP and database concerns.

pub mod access;
pub mod billing;
pub mod club;
pub mod foundation;
pub mod join_request;
pub mod membership;
pub mod notification;
pub mod settings;
pub mod training;
pub mod user;
pub mod wallet;
