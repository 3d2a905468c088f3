//! # API Error Responses
//!
//! The JSON body every failed request returns:
//!
//! ```json
//! {
//!   "message": "Title is required",
//!   "errors": ["Title is required"]
//! }
//! ```
//!
//! `errors` is present only when the failure carries field-level detail
//! (validation errors).

use axum::{body::Body, response::Response};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Wire shape of an error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub message: String,

    /// Field-level messages from the schema validator, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    /// Build the body for an application error.
    pub fn from_error(err: &AppError) -> Self {
        Self {
            message: err.message(),
            errors:  err.field_errors().map(|e| e.to_vec()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 5xx failures hide internals from the client but keep the full
        // story in the log; 4xx messages go through as-is.
        if status.is_server_error() {
            tracing::error!(code = %self.code(), message = %self.message(), "request failed");
        }
        else {
            tracing::debug!(code = %self.code(), message = %self.message(), "request rejected");
        }

        let body = if status.is_server_error() {
            ErrorBody {
                message: "Internal server error".to_string(),
                errors:  None,
            }
        }
        else {
            ErrorBody::from_error(&self)
        };

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string()),
            ))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_error_body_message_only() {
        let body = ErrorBody::from_error(&AppError::not_found("Article not found"));
        assert_eq!(body.message, "Article not found");
        assert!(body.errors.is_none());

        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("errors"));
    }

    #[test]
    fn test_error_body_with_field_errors() {
        let err = AppError::Validation {
            message: "Title is required".to_string(),
            errors:  vec!["Title is required".to_string()],
        };
        let body = ErrorBody::from_error(&err);
        assert_eq!(
            body.errors,
            Some(vec!["Title is required".to_string()])
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::conflict("slug taken").into_response();
        assert_eq!(response.status(), http::StatusCode::CONFLICT);
        assert_eq!(
            response
                .headers()
                .get("Content-Type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn test_into_response_hides_internal_detail() {
        let response = AppError::database("password in dsn leaked").into_response();
        assert_eq!(
            response.status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
