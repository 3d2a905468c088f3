//! # Health Handlers

use axum::Json;
use error::Result;
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::AppState;

/// Versioned health payload with uptime and a database ping
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status:         &'static str,
    pub uptime_seconds: u64,
    pub database:       &'static str,
}

/// Report service health; the database ping downgrades the payload
/// instead of failing the request.
pub async fn health_handler(state: &AppState) -> Result<Json<HealthResponse>> {
    let database = match state.db.execute_unprepared("SELECT 1").await {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            "down"
        },
    };

    Ok(Json(HealthResponse {
        status: "ok",
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    }))
}
