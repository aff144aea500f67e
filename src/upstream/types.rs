//! Upstream record types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of posts returned by the `/posts` endpoint.
pub const POSTS_LIMIT: usize = 5;

/// A post as served by the upstream collection.
///
/// Received wholesale and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Errors that can occur while fetching the upstream collection.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP client could not be constructed.
    #[error("Client setup failed: {0}")]
    Client(String),

    /// Connection or transport failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// Upstream answered with a non-success status.
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// Body was not an array of posts.
    #[error("Error decoding JSON: {0}")]
    Decode(String),

    /// Body exceeded the configured size cap.
    #[error("Response body exceeds {0} bytes")]
    TooLarge(usize),

    /// Upstream did not answer within the deadline.
    #[error("Upstream timeout after {0} seconds")]
    Timeout(u64),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Keep at most the first [`POSTS_LIMIT`] posts, preserving order.
pub fn first_posts(mut posts: Vec<Post>) -> Vec<Post> {
    posts.truncate(POSTS_LIMIT);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64) -> Post {
        Post {
            user_id: 1,
            id,
            title: format!("title {id}"),
            body: format!("body {id}"),
        }
    }

    #[test]
    fn test_wire_names() {
        let raw = r#"{"userId": 7, "id": 3, "title": "t", "body": "b"}"#;
        let p: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(p.user_id, 7);
        assert_eq!(p.id, 3);

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["userId"], 7);
        assert!(back.get("user_id").is_none());
    }

    #[test]
    fn test_missing_field_rejected() {
        let raw = r#"[{"userId": 1, "id": 1, "title": "t"}]"#;
        assert!(serde_json::from_str::<Vec<Post>>(raw).is_err());
    }

    #[test]
    fn test_first_posts_caps_at_limit() {
        let posts: Vec<Post> = (1..=8).map(post).collect();
        let trimmed = first_posts(posts);
        assert_eq!(trimmed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_first_posts_shorter_input() {
        assert_eq!(first_posts(vec![post(1), post(2)]).len(), 2);
        assert!(first_posts(Vec::new()).is_empty());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            UpstreamError::Status(503).to_string(),
            "Unexpected status code: 503"
        );
        assert_eq!(
            UpstreamError::Timeout(5).to_string(),
            "Upstream timeout after 5 seconds"
        );
        assert_eq!(
            UpstreamError::TooLarge(64).to_string(),
            "Response body exceeds 64 bytes"
        );
    }
}
