//! # Request ID Middleware
//!
//! Every response carries an `X-Request-ID`. Incoming IDs are honored
//! when they look sane, otherwise a fresh one is generated, so log
//! lines and client reports can be correlated.

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use logging::RequestId;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a request ID to the request span and the response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(RequestId::from_header)
        .unwrap_or_default();

    tracing::debug!(request_id = %request_id, method = %request.method(), path = %request.uri().path(), "Request received");

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    async fn dummy_handler() -> &'static str { "OK" }

    #[tokio::test]
    async fn test_response_carries_request_id() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(request_id_middleware));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(request_id_middleware));

        let request = Request::builder()
            .uri("/test")
            .header(REQUEST_ID_HEADER, "req_abc12345")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "req_abc12345"
        );
    }

    #[tokio::test]
    async fn test_garbage_request_id_is_replaced() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(request_id_middleware));

        let request = Request::builder()
            .uri("/test")
            .header(REQUEST_ID_HEADER, "n!o")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let echoed = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert_ne!(echoed, "n!o");
    }
}
