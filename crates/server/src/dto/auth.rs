//! # Authentication Data Transfer Objects

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::users::UserResponse;

/// Request to register a new account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name:     String,
    #[validate(email(message = "Invalid email format"))]
    pub email:    String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request to log in
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email:    String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful register/login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSuccessResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub user:  UserResponse,
}
