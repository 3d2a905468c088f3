//! # Inquiry Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a client inquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryResponse {
    pub id:         Uuid,
    pub subject:    String,
    pub message:    String,
    /// open, in_progress, resolved
    pub status:     String,
    pub user_id:    Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to open an inquiry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, max = 255, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Request to move an inquiry through the workflow (admin operation)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateInquiryRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Response for inquiry list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryListResponse {
    pub inquiries:  Vec<InquiryResponse>,
    pub pagination: PaginationInfo,
}

/// Query parameters for inquiry list
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryListQuery {
    pub page:   Option<u64>,
    pub limit:  Option<u64>,
    pub status: Option<String>,
}

impl InquiryListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
