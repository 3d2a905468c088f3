//! # Authentication Handlers
//!
//! Registration, login, and the current-user lookup. Registration
//! creates client accounts; admin accounts are created by an existing
//! admin through the user management endpoints (or the first-run seed).

use auth::{
    jwt::create_access_token,
    password::{hash_password, verify_password},
    secrecy::{ExposeSecret, SecretString},
};
use axum::Json;
use chrono::Utc;
use entity::{
    sea_orm_active_enums::UserRole,
    users::{Column as UserColumn, Entity as UsersEntity},
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        auth::{AuthSuccessResponse, LoginRequest, RegisterRequest},
        users::UserResponse,
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Register a new client account
pub async fn register_handler(state: &AppState, req: RegisterRequest) -> Result<Json<AuthSuccessResponse>> {
    req.validate()?;

    let existing = UsersEntity::find()
        .filter(UserColumn::Email.eq(&req.email))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::conflict("An account with this email already exists"));
    }

    let password_secret = SecretString::from(req.password);
    let password_hash = hash_password(&password_secret)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let now = Utc::now();
    let user = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        name:          Set(req.name),
        email:         Set(req.email),
        password_hash: Set(password_hash.expose_secret().to_string()),
        role:          Set(UserRole::Client),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    let created = user
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {}", e)))?;

    let token = create_access_token(
        &state.jwt_config,
        created.id,
        &created.email,
        &created.role.to_string(),
    )?;

    info!(user_id = %created.id, "User registered");

    Ok(Json(AuthSuccessResponse {
        token,
        user: user_model_to_response(&created),
    }))
}

/// Log in with email and password
pub async fn login_handler(state: &AppState, req: LoginRequest) -> Result<Json<AuthSuccessResponse>> {
    req.validate()?;

    let user = UsersEntity::find()
        .filter(UserColumn::Email.eq(&req.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    let password_secret = SecretString::from(req.password);
    verify_password(&password_secret, &user.password_hash)
        .map_err(|_| AppError::unauthorized("Invalid email or password"))?;

    let token = create_access_token(&state.jwt_config, user.id, &user.email, &user.role.to_string())?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthSuccessResponse {
        token,
        user: user_model_to_response(&user),
    }))
}

/// Return the profile behind the current session
pub async fn me_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<UserResponse>> {
    let db_user = UsersEntity::find_by_id(user.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user_model_to_response(&db_user)))
}

/// Convert a user entity model to a response DTO
pub fn user_model_to_response(user: &entity::users::Model) -> UserResponse {
    UserResponse {
        id:         user.id,
        name:       user.name.clone(),
        email:      user.email.clone(),
        role:       user.role.to_string(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_user(role: UserRole) -> entity::users::Model {
        entity::users::Model {
            id:            Uuid::new_v4(),
            name:          "Taylor Reed".to_string(),
            email:         "taylor@example.com".to_string(),
            password_hash: "hashed".to_string(),
            role,
            created_at:    Utc::now(),
            updated_at:    Utc::now(),
        }
    }

    #[test]
    fn test_user_model_to_response() {
        let user = make_test_user(UserRole::Admin);
        let response = user_model_to_response(&user);

        assert_eq!(response.id, user.id);
        assert_eq!(response.name, "Taylor Reed");
        assert_eq!(response.email, "taylor@example.com");
        assert_eq!(response.role, "admin");
    }

    #[test]
    fn test_user_model_to_response_client_role() {
        let user = make_test_user(UserRole::Client);
        assert_eq!(user_model_to_response(&user).role, "client");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        // The entity model skips password_hash on serialization; responses
        // use the DTO, so both layers keep the hash off the wire.
        let user = make_test_user(UserRole::Client);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed"));
    }
}
