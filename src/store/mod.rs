//! Shared state subsystem.
//!
//! # Design Decisions
//! - The store is owned by the server state and injected into handlers,
//!   never a process-wide global
//! - Sharded locking (DashMap); no eviction, no TTL, no persistence

pub mod kv;

pub use kv::KvStore;
