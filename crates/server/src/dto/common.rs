//! Shared response fragments.

use serde::{Deserialize, Serialize};

/// Pagination information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Current page number (1-based)
    pub page:        u64,
    /// Items per page
    pub per_page:    u64,
    /// Total number of items
    pub total:       u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        }
        else {
            total.div_ceil(per_page)
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Generic confirmation payload for deletes and other verb endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Clamp a 1-based page parameter.
pub fn clamp_page(page: Option<u64>) -> u64 { page.unwrap_or(1).max(1) }

/// Clamp a page-size parameter (default: 20, max: 100).
pub fn clamp_limit(limit: Option<u64>) -> u64 { limit.unwrap_or(20).clamp(1, 100) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_info_rounds_up() {
        let info = PaginationInfo::new(1, 20, 41);
        assert_eq!(info.total_pages, 3);
    }

    #[test]
    fn test_pagination_info_empty() {
        let info = PaginationInfo::new(1, 20, 0);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(5)), 5);
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), 100);
    }
}
