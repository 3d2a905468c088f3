//! Shared helpers for server integration tests.

use auth::JwtConfig;
use sea_orm::DatabaseConnection;
use server::{notify::NotificationDispatcher, AppState};
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig { JwtConfig::new("integration-test-secret-at-least-32-bytes") }

pub fn make_state(db: DatabaseConnection) -> AppState {
    AppState::new(db, test_jwt_config(), NotificationDispatcher::noop())
}

pub fn admin_token(state: &AppState) -> String {
    auth::jwt::create_access_token(
        &state.jwt_config,
        Uuid::new_v4(),
        "admin@example.com",
        "admin",
    )
    .expect("token creation")
}

pub fn client_token(state: &AppState) -> String {
    auth::jwt::create_access_token(
        &state.jwt_config,
        Uuid::new_v4(),
        "client@example.com",
        "client",
    )
    .expect("token creation")
}
