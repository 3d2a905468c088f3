//! # Story Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a single success story
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryResponse {
    pub id:            Uuid,
    pub title:         String,
    pub description:   String,
    pub image:         Option<String>,
    pub category:      String,
    pub slug:          String,
    pub author_id:     Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

/// Request to create a story
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateStoryRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title:       String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub image:       Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category:    String,
}

/// Request to update a story; title changes regenerate the slug
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateStoryRequest {
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title:       Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub image:       Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    pub category:    Option<String>,
}

/// Response for story list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryListResponse {
    pub stories:    Vec<StoryResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for story list
#[derive(Debug, Clone, Deserialize)]
pub struct StoryListQuery {
    pub page:     Option<u64>,
    pub limit:    Option<u64>,
    pub category: Option<String>,
}

impl StoryListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
