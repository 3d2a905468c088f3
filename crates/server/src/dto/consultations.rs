//! # Consultation Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for a consultation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultationResponse {
    pub id:            Uuid,
    pub subject:       String,
    pub description:   String,
    pub scheduled_for: DateTime<Utc>,
    /// requested, confirmed, completed, cancelled
    pub status:        String,
    pub client_id:     Uuid,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

/// Request from a client to book a consultation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateConsultationRequest {
    #[validate(length(min = 1, max = 255, message = "Subject is required"))]
    pub subject:       String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description:   String,
    pub scheduled_for: DateTime<Utc>,
}

/// Request to update a consultation (admin or owning client)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateConsultationRequest {
    #[validate(length(min = 1, max = 255, message = "Subject must not be empty"))]
    pub subject:       Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description:   Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub status:        Option<String>,
}

/// Response for consultation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultationListResponse {
    pub consultations: Vec<ConsultationResponse>,
    pub pagination:    PaginationInfo,
}

/// Query parameters for consultation list
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultationListQuery {
    pub page:   Option<u64>,
    pub limit:  Option<u64>,
    pub status: Option<String>,
}

impl ConsultationListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
