//! # Dashboard Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in the recent-activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    /// article, story, comment, contact, consultation, inquiry
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id:            Uuid,
    /// Title or short summary of the underlying row
    pub title:         String,
    pub timestamp:     DateTime<Utc>,
}

/// Row totals per entity type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EntityTotals {
    pub users:         u64,
    pub articles:      u64,
    pub stories:       u64,
    pub team_members:  u64,
    pub comments:      u64,
    pub contacts:      u64,
    pub inquiries:     u64,
    pub consultations: u64,
    pub messages:      u64,
}

/// Per-entity bucketed counts across the selected window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesData {
    pub contacts:      Vec<u64>,
    pub comments:      Vec<u64>,
    pub consultations: Vec<u64>,
}

/// Growth of the current period against the previous one, in percent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthSummary {
    pub contacts:      i64,
    pub comments:      i64,
    pub consultations: i64,
}

/// Admin dashboard statistics payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStatsResponse {
    pub totals:          EntityTotals,
    /// week, month, year
    pub time_range:      String,
    /// Bucket labels, oldest first
    pub labels:          Vec<String>,
    pub series:          SeriesData,
    pub growth:          GrowthSummary,
    pub recent_activity: Vec<ActivityItem>,
}

/// Stand-alone activity feed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityFeedResponse {
    pub activity: Vec<ActivityItem>,
}

/// Client-portal dashboard payload, scoped to the requesting user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDashboardResponse {
    pub inquiries:              u64,
    pub open_inquiries:         u64,
    pub consultations:          u64,
    pub upcoming_consultations: u64,
    pub unread_messages:        u64,
    pub recent_activity:        Vec<ActivityItem>,
}

/// Query parameters for the stats endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
}

/// Query parameters for the activity feed
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u64>,
}

impl ActivityQuery {
    /// Feed cap: default 10, never above 10.
    pub fn limit(&self) -> usize { self.limit.unwrap_or(10).clamp(1, 10) as usize }
}
