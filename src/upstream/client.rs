//! Posts client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue GET against the configured posts URL
//! - Reject non-success statuses and undecodable bodies
//! - Cap how much of the response body is buffered
//! - Bound every call with a deadline

use std::time::Duration;
use tokio::time::timeout;

use crate::config::UpstreamConfig;
use crate::upstream::types::{Post, UpstreamError, UpstreamResult};

/// HTTP client for the upstream posts collection.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct PostsClient {
    http: reqwest::Client,
    url: String,
    timeout_duration: Duration,
    max_body_bytes: usize,
}

impl PostsClient {
    /// Create a new client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: config.posts_url.clone(),
            timeout_duration: Duration::from_secs(config.timeout_secs),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Fetch and decode the full upstream collection.
    ///
    /// Either every element decodes or the call fails; a partial list is
    /// never returned.
    pub async fn fetch_posts(&self) -> UpstreamResult<Vec<Post>> {
        match timeout(self.timeout_duration, self.fetch_inner()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(url = %self.url, "Upstream timeout");
                Err(UpstreamError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    async fn fetch_inner(&self) -> UpstreamResult<Vec<Post>> {
        let mut response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(UpstreamError::TooLarge(self.max_body_bytes));
        }

        // Content-Length may be absent or wrong; enforce the cap while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                tracing::warn!(url = %self.url, limit = self.max_body_bytes, "Upstream body too large");
                return Err(UpstreamError::TooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        let posts: Vec<Post> =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        tracing::debug!(url = %self.url, count = posts.len(), "Upstream posts fetched");
        Ok(posts)
    }

    /// The URL this client fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}
