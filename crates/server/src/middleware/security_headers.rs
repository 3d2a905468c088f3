//! # Security Headers Middleware
//!
//! Adds standard security headers to all HTTP responses following
//! OWASP recommended practices. Cross-origin handling lives in the
//! router (tower-http `CorsLayer`); this module only stamps response
//! headers.

use axum::{
    extract::Request,
    http::{self, header::HeaderName},
    middleware::Next,
    response::Response,
};

/// Safely insert a header value, returning true on success
fn insert_header(headers: &mut http::HeaderMap, name: &str, value: &str) -> bool {
    if let (Ok(name), Ok(value)) = (
        name.parse::<HeaderName>(),
        value.parse::<http::HeaderValue>(),
    ) {
        headers.insert(name, value);
        true
    }
    else {
        tracing::warn!("Failed to insert header: {} = {}", name, value);
        false
    }
}

/// Security headers middleware
///
/// Adds the following security headers to all responses:
/// - Content-Security-Policy: Restricts resource loading origins
/// - X-Frame-Options: Prevents clickjacking
/// - X-Content-Type-Options: Prevents MIME sniffing
/// - Referrer-Policy: Controls referrer information
/// - Cache-Control: Prevents sensitive data caching for API responses
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    insert_header(
        headers,
        "Content-Security-Policy",
        "default-src 'none'; frame-ancestors 'none'",
    );

    insert_header(headers, "X-Frame-Options", "DENY");

    insert_header(headers, "X-Content-Type-Options", "nosniff");

    insert_header(
        headers,
        "Referrer-Policy",
        "strict-origin-when-cross-origin",
    );

    insert_header(
        headers,
        "Cache-Control",
        "no-store, no-cache, must-revalidate, private",
    );

    response
}
