//! # Article Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a single article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResponse {
    pub id:            Uuid,
    pub title:         String,
    pub content:       String,
    pub image:         Option<String>,
    pub category:      String,
    pub slug:          String,
    pub author_id:     Uuid,
    /// Author display name, resolved when the row is fetched with relations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name:   Option<String>,
    /// Number of comments, present on list/get responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

/// Request to create an article
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title:    String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content:  String,
    pub image:    Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
}

/// Request to update an article; all fields optional, title changes regenerate the slug
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title:    Option<String>,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content:  Option<String>,
    pub image:    Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    pub category: Option<String>,
}

/// Response for article list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleListResponse {
    pub articles:   Vec<ArticleResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for article list
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleListQuery {
    pub page:     Option<u64>,
    pub limit:    Option<u64>,
    pub category: Option<String>,
}

impl ArticleListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
