//! Error contract tests: status mapping and the wire body shape.

use error::{AppError, ErrorBody};
use http::StatusCode;

#[test]
fn test_status_mapping_matches_contract() {
    assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::bad_request("x").status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::forbidden("x").status(), StatusCode::FORBIDDEN);
    assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
    assert_eq!(
        AppError::internal("x").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::database("x").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_error_body_wire_shape() {
    let err = AppError::Validation {
        message: "Title is required".to_string(),
        errors:  vec!["Title is required".to_string()],
    };
    let body = ErrorBody::from_error(&err);
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["message"], "Title is required");
    assert_eq!(json["errors"][0], "Title is required");
}

#[test]
fn test_error_body_omits_empty_errors() {
    let body = ErrorBody::from_error(&AppError::not_found("Story not found"));
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["message"], "Story not found");
    assert!(json.get("errors").is_none());
}

#[test]
fn test_validation_errors_roundtrip_from_validator() {
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    let form = Form {
        email: "not-an-email".to_string(),
    };
    let err: AppError = form.validate().unwrap_err().into();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.field_errors().unwrap(),
        ["Invalid email format"]
    );
}
