//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → auth gate (protected routes only)
//!     → handlers.rs (store / upstream / echo)
//!     → error.rs (failures mapped to status + JSON)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer, ServerError};
