//! # Meridian API Server
//!
//! Axum-based HTTP API server for the Meridian marketing & CRM platform.
//!
//! ## Modules
//!
//! - [`dto`]: Request/response data transfer objects
//! - [`handlers`]: Entity CRUD, dashboard and auth handlers
//! - [`middleware`]: HTTP middleware (auth, permissions, security headers)
//! - [`notify`]: Best-effort email/SMS notification dispatch
//! - [`revalidate`]: View-staleness signals for the presentation layer
//! - [`router`]: API route configuration
//! - [`stats`]: Dashboard aggregation primitives

use std::sync::Arc;

use auth::JwtConfig;
use error::Result;

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod revalidate;
pub mod router;
pub mod stats;
pub mod utils;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db:          sea_orm::DbConn,
    /// JWT configuration
    pub jwt_config:  JwtConfig,
    /// Notification dispatcher (email + SMS channels)
    pub notifier:    Arc<notify::NotificationDispatcher>,
    /// View invalidation signal for the presentation layer
    pub revalidator: revalidate::Revalidator,
    /// Server start time for uptime calculation
    pub start_time:  std::time::Instant,
}

impl AppState {
    /// Assemble the application state from its parts.
    pub fn new(db: sea_orm::DbConn, jwt_config: JwtConfig, notifier: notify::NotificationDispatcher) -> Self {
        Self {
            db,
            jwt_config,
            notifier: Arc::new(notifier),
            revalidator: revalidate::Revalidator::new(),
            start_time: std::time::Instant::now(),
        }
    }
}
