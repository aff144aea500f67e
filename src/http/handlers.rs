//! Route handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::upstream::{first_posts, Post};

/// Result of a `/user/{name}` lookup.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserLookup {
    Found { user: String, value: String },
    Missing { user: String, status: &'static str },
}

/// Payload accepted (and echoed) by `/test`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub password: i64,
}

impl Credentials {
    /// Both fields are required: an empty name or a zero password is rejected.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("field `name` is required".to_string());
        }
        if self.password == 0 {
            return Err("field `password` is required".to_string());
        }
        Ok(())
    }
}

/// Payload accepted by `/admin`.
#[derive(Debug, Deserialize)]
pub struct SetValue {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct WriteStatus {
    pub status: &'static str,
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<UserLookup> {
    let lookup = match state.store.get(&name) {
        Some(value) => UserLookup::Found { user: name, value },
        None => UserLookup::Missing {
            user: name,
            status: "no value",
        },
    };
    Json(lookup)
}

/// Fetch the upstream collection and return its first few posts.
pub async fn get_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let posts = state.posts.fetch_posts().await?;
    Ok(Json(first_posts(posts)))
}

/// Validate a name + numeric password and echo it back.
pub async fn echo_credentials(body: Bytes) -> ApiResult<Json<Credentials>> {
    let payload: Credentials =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    payload.validate().map_err(ApiError::BadRequest)?;

    tracing::info!(name = %payload.name, "Test payload accepted");
    Ok(Json(payload))
}

/// Store `value` under the caller's username.
pub async fn set_value(
    identity: Identity,
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<WriteStatus>> {
    let payload: SetValue = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(user = %identity, error = %e, "Rejected admin payload");
        ApiError::Unauthorized
    })?;
    if payload.value.is_empty() {
        tracing::warn!(user = %identity, "Rejected empty admin value");
        return Err(ApiError::Unauthorized);
    }

    state.store.set(identity.0, payload.value);
    Ok(Json(WriteStatus { status: "ok" }))
}

/// Default for unmatched paths and methods.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
