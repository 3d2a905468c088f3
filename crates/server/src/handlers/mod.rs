//! # Request Handlers
//!
//! One module per endpoint group. Handlers take `&AppState` plus the
//! request-scoped principal and are wrapped by the router's extractor
//! shims.

pub mod appointments;
pub mod articles;
pub mod auth;
pub mod comments;
pub mod consultations;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod inquiries;
pub mod messages;
pub mod stories;
pub mod team;
pub mod users;
