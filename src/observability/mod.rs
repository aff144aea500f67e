//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → TraceLayer spans per request (with x-request-id)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;
