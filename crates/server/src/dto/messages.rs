//! # Message Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a portal message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub id:         Uuid,
    pub content:    String,
    pub is_read:    bool,
    pub sender_id:  Uuid,
    /// Sender display name, resolved when fetched with relations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to send a message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, message = "Message content is required"))]
    pub content: String,
}

/// Response for message list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageListResponse {
    pub messages:   Vec<MessageResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for message list
#[derive(Debug, Clone, Deserialize)]
pub struct MessageListQuery {
    pub page:   Option<u64>,
    pub limit:  Option<u64>,
    /// Filter to unread messages only
    pub unread: Option<bool>,
}

impl MessageListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
