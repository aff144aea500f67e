//! Basic-auth middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::auth::credentials::{parse_basic_auth, CredentialTable, Identity};
use crate::http::error::ApiError;

/// State required by the gate.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub credentials: Arc<CredentialTable>,
    pub realm: String,
}

impl AuthState {
    pub fn new(credentials: CredentialTable, realm: impl Into<String>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            realm: realm.into(),
        }
    }

    fn challenge(&self) -> Response {
        let value = format!("Basic realm=\"{}\"", self.realm.replace('"', "\\\""));
        let mut response = (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": "unauthorized" })),
        )
            .into_response();
        if let Ok(value) = HeaderValue::from_str(&value) {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }
        response
    }
}

/// Reject the request unless it carries credentials present in the table.
///
/// On success the matched [`Identity`] is attached as a request extension.
pub async fn require_basic_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_basic_auth);

    let Some((username, password)) = credentials else {
        tracing::warn!(path = %request.uri().path(), "Missing or malformed basic auth");
        return state.challenge();
    };

    match state.credentials.verify(&username, &password) {
        Some(identity) => {
            tracing::debug!(user = %identity, "Basic auth accepted");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => {
            tracing::warn!(user = %username, "Basic auth rejected");
            state.challenge()
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
