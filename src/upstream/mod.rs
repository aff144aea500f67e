//! Upstream integration subsystem.
//!
//! # Data Flow
//! ```text
//! /posts handler
//!     → client.rs (GET posts_url, bounded by timeout)
//!     → types.rs (decode Vec<Post>, trim to POSTS_LIMIT)
//!     → handler serializes the prefix
//! ```
//!
//! # Design Decisions
//! - Upstream is untrusted: any failure fails the whole call
//! - No retries, no caching
//! - Dropping the handler future abandons the in-flight call

pub mod client;
pub mod types;

pub use client::PostsClient;
pub use types::{first_posts, Post, UpstreamError, UpstreamResult, POSTS_LIMIT};
