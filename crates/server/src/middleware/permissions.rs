//! # Authorization Guards
//!
//! Role and ownership checks handlers call before mutating anything.
//! A valid session with the wrong role is a 403, never a 401.

use error::{AppError, Result};
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;

/// Require the admin role.
pub fn require_admin(user: &AuthenticatedUser) -> Result<()> {
    if user.is_admin() {
        Ok(())
    }
    else {
        Err(AppError::forbidden("Administrator access required"))
    }
}

/// Require the admin role, or that the acting user owns the resource.
pub fn require_admin_or_owner(user: &AuthenticatedUser, owner_id: Uuid) -> Result<()> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    }
    else {
        Err(AppError::forbidden(
            "You do not have permission to modify this resource",
        ))
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::UserRole;

    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_admin_allows_admin() {
        assert!(require_admin(&user(UserRole::Admin)).is_ok());
    }

    #[test]
    fn test_require_admin_forbids_client() {
        let err = require_admin(&user(UserRole::Client)).unwrap_err();
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_require_admin_or_owner_allows_owner() {
        let client = user(UserRole::Client);
        assert!(require_admin_or_owner(&client, client.id).is_ok());
    }

    #[test]
    fn test_require_admin_or_owner_forbids_stranger() {
        let client = user(UserRole::Client);
        let err = require_admin_or_owner(&client, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_require_admin_or_owner_allows_admin_over_any_row() {
        let admin = user(UserRole::Admin);
        assert!(require_admin_or_owner(&admin, Uuid::new_v4()).is_ok());
    }
}
