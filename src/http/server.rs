//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Gate protected routes behind basic auth
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Serve on a listener until shutdown is triggered

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{require_basic_auth, AuthState, CredentialTable};
use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{RequestUuid, X_REQUEST_ID};
use crate::store::KvStore;
use crate::upstream::{PostsClient, UpstreamError};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: KvStore,
    pub posts: PostsClient,
    pub auth: AuthState,
}

impl AppState {
    /// Build state from configuration with an empty store.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServerError> {
        let credentials = CredentialTable::new(config.auth.accounts.clone());
        Ok(Self {
            store: KvStore::new(),
            posts: PostsClient::new(&config.upstream)?,
            auth: AuthState::new(credentials, config.auth.realm.clone()),
        })
    }
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a server around pre-built state.
    pub fn with_state(config: ServiceConfig, state: AppState) -> Self {
        let router = build_router(&config, state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            accounts = self.state.auth.credentials.len(),
            upstream = %self.state.posts.url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let protected: Router<AppState> = Router::new()
        .route("/admin", post(handlers::set_value))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/user/{name}", get(handlers::get_user))
        .route("/posts", get(handlers::get_posts))
        .route("/test", post(handlers::echo_credentials))
        .merge(protected)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, RequestUuid))
}
