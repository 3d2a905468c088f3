//! # HTTP Middleware
//!
//! - [`auth`]: bearer-token validation and the request-scoped principal
//! - [`permissions`]: role/ownership guards used inside handlers
//! - [`request_id`]: per-request correlation IDs
//! - [`security_headers`]: OWASP-recommended response headers

pub mod auth;
pub mod permissions;
pub mod request_id;
pub mod security_headers;
