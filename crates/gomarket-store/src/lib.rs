//! # gomarket-store: Storage Layer for the GoMarket Cart
//!
//! This crate bridges the pure cart model from `gomarket-core` to a local
//! key-value store, and exposes the consumer-facing cart contract.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GoMarket Cart Data Flow                            │
//! │                                                                         │
//! │  UI event (tap product / "+" / "−")                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  gomarket-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartProvider │    │   CartStore   │    │   Backends   │  │   │
//! │  │   │ (provider.rs) │───►│  (store.rs)   │───►│ (backend.rs, │  │   │
//! │  │   │               │    │               │    │  sqlite.rs)  │  │   │
//! │  │   │ scope guard   │    │ Mutex<Cart> + │    │ Memory       │  │   │
//! │  │   │               │    │ async writes  │    │ SQLite (kv)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SQLite kv_store table                           │   │
//! │  │   "@GoMarket:Cart" → [{"id":"p1",...,"quantity":2}, ...]        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - `StorageBackend` trait + in-memory backend
//! - [`sqlite`] - SQLite-backed key-value store (pool, config, migrations)
//! - [`store`] - `CartStore`: load on open, fire-and-forget persistence
//! - [`provider`] - `CartProvider`: loud-failure access scope
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gomarket_store::{CartStore, SqliteBackend, StoreConfig};
//!
//! // Open the SQLite backend (runs migrations)
//! let backend = Arc::new(SqliteBackend::new(StoreConfig::new("gomarket.db")).await?);
//!
//! // Load whatever cart was persisted last session (empty on fresh install)
//! let store = CartStore::open(backend).await;
//!
//! // Mutate; each call schedules a fire-and-forget write of the new state
//! store.add_to_cart(candidate);
//! store.increment("p1");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod provider;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{MemoryBackend, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use provider::CartProvider;
pub use sqlite::{SqliteBackend, StoreConfig};
pub use store::{CartStore, CART_STORAGE_KEY};

// Core re-exports so consumers don't need a direct gomarket-core dependency
pub use gomarket_core::{Cart, LineItem, ProductInfo};
