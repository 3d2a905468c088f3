//! # Contact Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a contact-form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactResponse {
    pub id:         Uuid,
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
    pub phone:      Option<String>,
    pub company:    Option<String>,
    pub website:    Option<String>,
    pub city:       Option<String>,
    pub state:      Option<String>,
    pub message:    String,
    /// new, in_progress, completed, archived
    pub status:     String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request from the public contact form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name:  String,
    #[validate(email(message = "Invalid email format"))]
    pub email:      String,
    pub phone:      Option<String>,
    pub company:    Option<String>,
    #[validate(url(message = "Invalid website URL"))]
    pub website:    Option<String>,
    pub city:       Option<String>,
    pub state:      Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message:    String,
}

/// Request to move a contact through the workflow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateContactStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Response for contact list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactListResponse {
    pub contacts:   Vec<ContactResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for contact list
#[derive(Debug, Clone, Deserialize)]
pub struct ContactListQuery {
    pub page:   Option<u64>,
    pub limit:  Option<u64>,
    /// Filter by workflow status
    pub status: Option<String>,
}

impl ContactListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
