//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Protected request:
//!     → middleware.rs (extract Authorization header)
//!     → credentials.rs (decode basic pair, exact table lookup)
//!     → Identity inserted as request extension
//!     → handler extracts Identity
//! ```
//!
//! # Design Decisions
//! - Fail closed: missing, malformed and wrong credentials all get 401
//! - Response never says which part was wrong
//! - Plain string comparison; no lockout

pub mod credentials;
pub mod middleware;

pub use credentials::{basic_auth_header, parse_basic_auth, CredentialTable, Identity};
pub use middleware::{require_basic_auth, AuthState};
