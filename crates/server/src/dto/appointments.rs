//! # Appointment Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{clamp_limit, clamp_page, PaginationInfo};

/// Response for an appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentResponse {
    pub id:            Uuid,
    pub user_id:       Uuid,
    pub scheduled_for: DateTime<Utc>,
    pub notes:         Option<String>,
    /// scheduled, cancelled, completed
    pub status:        String,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

/// Request to book an appointment for a user (admin operation)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub user_id:       Uuid,
    pub scheduled_for: DateTime<Utc>,
    pub notes:         Option<String>,
}

/// Request to update an appointment; status changes trigger notifications
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateAppointmentRequest {
    pub scheduled_for: Option<DateTime<Utc>>,
    pub notes:         Option<String>,
    pub status:        Option<String>,
}

/// Response for appointment list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentResponse>,
    pub pagination:   PaginationInfo,
}

/// Query parameters for appointment list
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentListQuery {
    pub page:   Option<u64>,
    pub limit:  Option<u64>,
    pub status: Option<String>,
}

impl AppointmentListQuery {
    pub fn page(&self) -> u64 { clamp_page(self.page) }

    pub fn limit(&self) -> u64 { clamp_limit(self.limit) }
}
