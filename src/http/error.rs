//! API error types.
//!
//! Every handler failure resolves to one of these; none of them is fatal to
//! the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Body returned for any upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Error making the request";

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input failed to decode; the message is returned verbatim.
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::BadRequest(message) => json!({ "error": message }),
            Self::Unauthorized => json!({ "status": "unauthorized" }),
            Self::NotFound => json!({ "error": "not found" }),
            Self::Upstream(e) => {
                // Detail stays in the logs; the client gets a generic message.
                tracing::error!(error = %e, "Upstream request failed");
                json!({ "error": UPSTREAM_FAILURE_MESSAGE })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
