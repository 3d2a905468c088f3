//! # Rejection Handlers
//!
//! Extractors that convert Axum extraction failures into the standard
//! error body. Malformed JSON and bad query strings are client errors,
//! so both map to 400.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest,
        FromRequestParts,
        Query,
        Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::response::ErrorBody;

/// JSON body extractor whose rejection follows the API error contract.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(handle_json_rejection(rejection)),
        }
    }
}

/// Query string extractor whose rejection follows the API error contract.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(handle_query_rejection(rejection)),
        }
    }
}

/// Handle JSON deserialization errors and convert them to proper API responses.
///
/// Catches errors like "missing field `title`" and rewrites them into a
/// friendlier message where possible.
pub fn handle_json_rejection(rejection: JsonRejection) -> Response {
    let error_message = rejection.to_string();

    let message = if let Some(start) = error_message.find("missing field `") {
        let rest = &error_message[start + 15 ..];
        match rest.find('`') {
            Some(end) => format!("Missing required field: {}", &rest[.. end]),
            None => error_message,
        }
    }
    else {
        error_message
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message,
            errors: None,
        }),
    )
        .into_response()
}

/// Handle query string deserialization errors and convert them to proper API responses.
pub fn handle_query_rejection(rejection: QueryRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: format!("Invalid query string: {}", rejection),
            errors:  None,
        }),
    )
        .into_response()
}
