//! # Authentication Middleware
//!
//! Validates the bearer token and turns its claims into the
//! request-scoped principal handlers work with. Handlers never read
//! session state from anywhere else.

use auth::jwt::{extract_bearer_token, validate_token};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::UserRole;
use error::ErrorBody;
use uuid::Uuid;

use crate::AppState;

/// The request-scoped principal extracted from a valid token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID
    pub id:    Uuid,
    /// User email
    pub email: String,
    /// User role
    pub role:  UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }
}

/// Principal that may be absent; used on endpoints open to guests.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

/// Authentication middleware
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the JWT token
/// 3. Adds the authenticated principal to request extensions
/// 4. Rejects requests with invalid/missing tokens
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let user = match principal_from_request(&state, &request) {
        Ok(user) => user,
        Err(message) => return unauthorized_response(message),
    };

    request.extensions_mut().insert(user);

    next.run(request).await
}

/// Optional-authentication middleware
///
/// Same token handling as [`auth_middleware`], but a missing or invalid
/// token yields `MaybeUser(None)` instead of a 401. Used on endpoints
/// that accept both guests and signed-in users (comment creation).
pub async fn optional_auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let maybe = MaybeUser(principal_from_request(&state, &request).ok());
    request.extensions_mut().insert(maybe);

    next.run(request).await
}

/// Resolve the principal for a request, or a human-readable refusal.
fn principal_from_request(state: &AppState, request: &Request) -> Result<AuthenticatedUser, &'static str> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("Missing authorization header")?
        .to_str()
        .map_err(|_| "Invalid authorization header encoding")?;

    let token = extract_bearer_token(auth_header).ok_or("Invalid authorization header format")?;

    let claims = validate_token(&state.jwt_config, &token).map_err(|e| {
        match e {
            error::AppError::JwtExpired => "Token has expired",
            _ => "Invalid token",
        }
    })?;

    let role = match claims.role.as_str() {
        "admin" => UserRole::Admin,
        "client" => UserRole::Client,
        _ => return Err("Invalid token"),
    };

    Ok(AuthenticatedUser {
        id: claims.sub,
        email: claims.email,
        role,
    })
}

/// Create standardized authentication error response
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        axum::Json(ErrorBody {
            message: message.to_string(),
            errors:  None,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use auth::jwt::extract_bearer_token;

    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_bearer_token("Bearer   abc123   "),
            Some("abc123".to_string())
        );
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
    }

    #[test]
    fn test_is_admin() {
        let admin = AuthenticatedUser {
            id:    Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            role:  UserRole::Admin,
        };
        let client = AuthenticatedUser {
            id:    Uuid::new_v4(),
            email: "client@example.com".to_string(),
            role:  UserRole::Client,
        };

        assert!(admin.is_admin());
        assert!(!client.is_admin());
    }

    #[test]
    fn test_unauthorized_response_shape() {
        let response = unauthorized_response("Missing authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}
