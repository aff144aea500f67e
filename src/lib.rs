//! Key-value relay service library.
//!
//! A small HTTP service: a liveness route, reads and basic-auth protected
//! writes against an in-memory store, an echo/validation route, and a route
//! that relays the first few posts of an upstream JSON collection.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;
pub mod upstream;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
