//! # Team Member Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a public team bio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMemberResponse {
    pub id:          Uuid,
    pub name:        String,
    pub title:       String,
    pub description: Option<String>,
    pub image:       Option<String>,
    pub linkedin:    Option<String>,
    pub email:       Option<String>,
    pub author_id:   Uuid,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

/// Request to create a team bio
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name:        String,
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title:       String,
    pub description: Option<String>,
    pub image:       Option<String>,
    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin:    Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:       Option<String>,
}

/// Request to update a team bio
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name:        Option<String>,
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title:       Option<String>,
    pub description: Option<String>,
    pub image:       Option<String>,
    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin:    Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:       Option<String>,
}

/// Response for team list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamListResponse {
    pub team:       Vec<TeamMemberResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for team list
#[derive(Debug, Clone, Deserialize)]
pub struct TeamListQuery {
    pub page:  Option<u64>,
    pub limit: Option<u64>,
}

impl TeamListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
