//! # Comment Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a single comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponse {
    pub id:          Uuid,
    pub content:     String,
    /// Present for comments left by registered users
    pub author_id:   Option<Uuid>,
    /// Display name: the registered user's name or the guest name
    pub author_name: String,
    pub article_id:  Option<Uuid>,
    pub story_id:    Option<Uuid>,
    pub created_at:  DateTime<Utc>,
}

/// Request to create a comment
///
/// Exactly one of `article_id`/`story_id` must be supplied; when both
/// arrive, `article_id` wins. Guest fields are required when the request
/// carries no session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment content is required"))]
    pub content:          String,
    #[serde(alias = "articleId")]
    pub article_id:       Option<Uuid>,
    #[serde(alias = "storyId")]
    pub story_id:         Option<Uuid>,
    pub guest_first_name: Option<String>,
    pub guest_last_name:  Option<String>,
    #[validate(email(message = "Invalid guest email format"))]
    pub guest_email:      Option<String>,
}

/// Request to update a comment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Comment content is required"))]
    pub content: String,
}

/// Response for comment list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentListResponse {
    pub comments:   Vec<CommentResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for comment list
#[derive(Debug, Clone, Deserialize)]
pub struct CommentListQuery {
    pub page:       Option<u64>,
    pub limit:      Option<u64>,
    #[serde(rename = "articleId")]
    pub article_id: Option<Uuid>,
    #[serde(rename = "storyId")]
    pub story_id:   Option<Uuid>,
}

impl CommentListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
