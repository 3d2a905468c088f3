//! # Request ID Tracking
//!
//! Utilities for generating and propagating request IDs across the
//! application. IDs are simple UUIDs rendered without hyphens so they
//! stay header-safe.

use uuid::Uuid;

/// A request ID attached to every handled request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    #[inline]
    pub fn new() -> Self { Self(Uuid::new_v4().simple().to_string()) }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }

    /// Parse a request ID from an incoming header value.
    ///
    /// Accepts any alphanumeric/dash/underscore token of plausible
    /// length; anything else gets a fresh ID instead.
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        if (8 ..= 64).contains(&value.len()) &&
            value
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            Some(Self(value.to_string()))
        }
        else {
            None
        }
    }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_from_header_valid() {
        let id = RequestId::from_header("req_1234abcd").unwrap();
        assert_eq!(id.as_str(), "req_1234abcd");
    }

    #[test]
    fn test_from_header_rejects_garbage() {
        assert!(RequestId::from_header("no!").is_none());
        assert!(RequestId::from_header("").is_none());
        assert!(RequestId::from_header(&"x".repeat(100)).is_none());
    }
}
