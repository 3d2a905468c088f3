//! # User Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id:         Uuid,
    pub name:       String,
    pub email:      String,
    /// "admin" or "client"
    pub role:       String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a user (admin operation)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name:     String,
    #[validate(email(message = "Invalid email format"))]
    pub email:    String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Role to assign (admin, client); defaults to client
    pub role:     Option<String>,
}

/// Request to update a user (admin operation)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name:     Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:    Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub role:     Option<String>,
}

/// Response for user list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListResponse {
    pub users:      Vec<UserResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for user list
#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    pub page:  Option<u64>,
    pub limit: Option<u64>,
    /// Filter by role (admin, client)
    pub role:  Option<String>,
}

impl UserListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_list_query_defaults() {
        let query = UserListQuery {
            page:  None,
            limit: None,
            role:  None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
    }

    #[test]
    fn test_user_list_query_clamp() {
        let query = UserListQuery {
            page:  Some(0),
            limit: Some(500),
            role:  None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);
    }
}
