//! Sportcamp - multi-tenant sports club management backend
//!
//! Role-based management of clubs, memberships, training sessions,
//! attendance, wallets, and billing over PostgreSQL, exposed as a JSON
//! HTTP API with cookie-based sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
