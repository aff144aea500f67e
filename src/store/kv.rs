//! Concurrent in-memory key-value store.

use dashmap::DashMap;
use std::sync::Arc;

/// A thread-safe string map shared by every in-flight request.
///
/// Cloning is cheap and yields a handle to the same underlying map. Each
/// `set` replaces the whole value under the shard lock, so a concurrent
/// `get` observes either the previous or the new value, never a mix.
#[derive(Clone, Debug, Default)]
pub struct KvStore {
    inner: Arc<DashMap<String, String>>,
}

impl KvStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of the current value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    /// Insert or overwrite the value for `key`. Last writer wins.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let previous = self.inner.insert(key.clone(), value.into());
        tracing::debug!(key = %key, replaced = previous.is_some(), "Store entry written");
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
