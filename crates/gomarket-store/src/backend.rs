//! # Storage Backend Abstraction
//!
//! The opaque asynchronous key-value contract the cart persists through,
//! plus an in-memory implementation for tests and no-persistence setups.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    StorageBackend Contract                              │
//! │                                                                         │
//! │  get(key)        ──► Ok(Some(value))  value previously stored          │
//! │                  ──► Ok(None)         nothing stored under key          │
//! │                  ──► Err(_)           backend failure                   │
//! │                                                                         │
//! │  set(key, value) ──► Ok(())           stored, overwriting any previous │
//! │                  ──► Err(_)           backend failure                   │
//! │                                                                         │
//! │  Absence is a VALUE (None), not an error: a fresh install has no cart  │
//! │  and that is a normal state, not a failure.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageResult;

/// Asynchronous key-value storage.
///
/// The cart only ever touches one fixed key, but the contract is a generic
/// KV store so backends stay oblivious to what they hold.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`. Absent keys yield `Ok(None)`.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any existing value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory storage backend.
///
/// ## Usage
/// - Tests: deterministic, no filesystem
/// - Dev/preview builds where persistence across restarts doesn't matter
///
/// Data lives in a `HashMap` behind a tokio `RwLock`; everything is lost
/// when the process exits.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        MemoryBackend {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a backend pre-seeded with a single entry.
    ///
    /// Test convenience for "app restarts with a persisted cart" scenarios.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        MemoryBackend {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().await;
        let value = entries.get(key).cloned();
        debug!(key = %key, found = value.is_some(), "memory get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        debug!(key = %key, bytes = value.len(), "memory set");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key_is_none_not_error() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let backend = MemoryBackend::new();

        backend.set("k", "v1").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v1"));
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let backend = MemoryBackend::new();

        backend.set("k", "v1").await.unwrap();
        backend.set("k", "v2").await.unwrap();

        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_with_entry_seeds_value() {
        let backend = MemoryBackend::with_entry("k", "seeded");
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("seeded"));
    }
}
