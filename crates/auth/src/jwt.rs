//! # JWT Token Management
//!
//! JWT token generation and validation for API authentication.

use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use error::{AppError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT configuration shared by the server and CLI.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret
    pub secret:             String,
    /// Token lifetime in seconds
    pub expiration_seconds: u64,
    /// Token issuer
    pub issuer:             String,
    /// Token audience
    pub audience:           String,
}

impl JwtConfig {
    /// Build a config with the standard issuer/audience and a one-day lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret:             secret.into(),
            expiration_seconds: 86_400,
            issuer:             "meridian".to_string(),
            audience:           "meridian-api".to_string(),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,

    /// User email
    pub email: String,

    /// User role (admin or client)
    pub role: String,

    /// Token issuer
    pub iss: String,

    /// Token audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: u64,

    /// Issued at (Unix timestamp)
    pub iat: u64,

    /// Unique token ID
    pub jti: String,
}

/// Creates a new JWT access token
///
/// # Arguments
///
/// * `config` - JWT configuration
/// * `user_id` - The user's unique identifier
/// * `email` - The user's email address
/// * `role` - The user's role
///
/// # Errors
///
/// Returns an error if token encoding fails.
pub fn create_access_token(config: &JwtConfig, user_id: Uuid, email: &str, role: &str) -> Result<String> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| AppError::internal(format!("Failed to get current time: {}", e)))?;

    let expiration = now + Duration::from_secs(config.expiration_seconds);

    let claims = Claims {
        sub:   user_id,
        email: email.to_string(),
        role:  role.to_string(),
        iss:   config.issuer.clone(),
        aud:   config.audience.clone(),
        exp:   expiration.as_secs(),
        iat:   now.as_secs(),
        jti:   Uuid::new_v4().simple().to_string(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode token: {}", e)))
}

/// Validates a JWT token and returns the claims
///
/// # Arguments
///
/// * `config` - JWT configuration
/// * `token` - The JWT token to validate
///
/// # Errors
///
/// `JwtExpired` for expired tokens, `JwtInvalid` for any other
/// validation failure.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

    let mut validation = Validation::default();
    let mut iss_set = HashSet::new();
    iss_set.insert(config.issuer.clone());
    validation.iss = Some(iss_set);
    let mut aud = HashSet::new();
    aud.insert(config.audience.clone());
    validation.aud = Some(aud);
    validation.validate_exp = true;

    let data = jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::JwtExpired,
            _ => AppError::JwtInvalid,
        }
    })?;

    Ok(data.claims)
}

/// Extracts the Bearer token from the Authorization header
///
/// # Arguments
///
/// * `auth_header` - The Authorization header value
///
/// # Returns
///
/// The token string if present, or None if missing/invalid.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    if !auth_header.starts_with("Bearer ") {
        return None;
    }

    let token = auth_header.trim_start_matches("Bearer ").trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret:             "test-secret-key-that-is-at-least-32-bytes-long".to_string(),
            expiration_seconds: 3600,
            issuer:             "test-issuer".to_string(),
            audience:           "test-audience".to_string(),
        }
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(&config, user_id, "test@example.com", "admin")
            .expect("Failed to create token");

        assert!(!token.is_empty());

        let claims = validate_token(&config, &token).expect("Failed to validate token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-audience");
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let config = test_config();
        let token = create_access_token(&config, Uuid::new_v4(), "a@b.c", "client").unwrap();

        let other = JwtConfig {
            secret: "a-completely-different-secret-value-here".to_string(),
            ..test_config()
        };
        assert!(matches!(
            validate_token(&other, &token),
            Err(AppError::JwtInvalid)
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_audience() {
        let config = test_config();
        let token = create_access_token(&config, Uuid::new_v4(), "a@b.c", "client").unwrap();

        let other = JwtConfig {
            audience: "someone-else".to_string(),
            ..test_config()
        };
        assert!(validate_token(&other, &token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test-token";
        let auth_header = format!("Bearer {}", token);

        let extracted = extract_bearer_token(&auth_header).expect("Failed to extract token");

        assert_eq!(extracted, token);
    }

    #[test]
    fn test_extract_bearer_token_invalid_format() {
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
    }
}
