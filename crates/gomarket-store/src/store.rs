//! # Cart Store
//!
//! Owns the in-memory cart and synchronizes it to a storage backend under
//! one fixed key.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Lifecycle                                │
//! │                                                                         │
//! │  App start                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore::open(backend) ── get("@GoMarket:Cart")                     │
//! │       │                                                                 │
//! │       ├── value present & well-formed ──► adopt as initial state       │
//! │       ├── value absent (fresh install) ──► empty cart                  │
//! │       └── value malformed ──────────────► empty cart + warn log        │
//! │                                                                         │
//! │  UI events                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_to_cart / increment / decrement                                   │
//! │       │  1. mutate in-memory state under the lock                       │
//! │       │  2. serialize the POST-mutation snapshot while still locked     │
//! │       │  3. schedule a fire-and-forget write of that snapshot           │
//! │       ▼                                                                 │
//! │  set("@GoMarket:Cart", snapshot)  (errors logged, never surfaced)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Races
//! Two rapid mutations race their writes; there is no queuing discipline.
//! Each write carries the state serialized at its own mutation (by value,
//! not a deferred reference), so no write can observe a later state and no
//! mutation is lost to a stale closed-over snapshot. Accepted limitation
//! for a single-user, single-device cart.
//!
//! ## Thread Safety
//! The cart is behind a `Mutex` because callers (UI event handlers, the
//! spawned write tasks' snapshot step) may overlap. Operations are quick;
//! a `RwLock` would add complexity with minimal benefit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use gomarket_core::{Cart, LineItem, ProductInfo};

/// The fixed namespaced key the cart is persisted under.
///
/// Kept identical to what the mobile shell historically used so previously
/// persisted carts keep loading.
pub const CART_STORAGE_KEY: &str = "@GoMarket:Cart";

/// Tracks writes that have been scheduled but not yet completed.
///
/// Lets [`CartStore::flush`] wait for in-flight persistence (tests,
/// shutdown) without imposing any ordering on the writes themselves.
#[derive(Debug, Default)]
struct PendingWrites {
    count: AtomicUsize,
    notify: Notify,
}

/// The cart store: in-memory state plus a persistence bridge.
///
/// ## Consumer Contract
/// - [`CartStore::products`] - current line items, read-only snapshot
/// - [`CartStore::add_to_cart`] / [`CartStore::increment`] /
///   [`CartStore::decrement`] - mutations; each schedules a best-effort
///   write of the new state
///
/// Mutations must be called from within a tokio runtime (they spawn the
/// persistence task); in the storefront that is always the case since the
/// whole shell runs on the runtime.
pub struct CartStore {
    /// In-memory cart state
    cart: Mutex<Cart>,

    /// Persistence backend (opaque key-value store)
    backend: Arc<dyn StorageBackend>,

    /// Key the cart is persisted under
    key: String,

    /// In-flight write accounting for `flush`
    pending: Arc<PendingWrites>,
}

impl CartStore {
    /// Opens a cart store under the default key [`CART_STORAGE_KEY`].
    ///
    /// Loads whatever was persisted last session. This never fails: absent
    /// or malformed persisted values degrade to an empty cart (a fresh
    /// install has no cart, and a corrupt one must not crash the app).
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Self {
        Self::open_with_key(backend, CART_STORAGE_KEY).await
    }

    /// Opens a cart store under a custom key.
    pub async fn open_with_key(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match backend.get(&key).await {
            Ok(Some(stored)) => match Cart::from_json(&stored) {
                Ok(cart) => {
                    info!(key = %key, items = cart.item_count(), "Loaded persisted cart");
                    cart
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Persisted cart is malformed, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No persisted cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read persisted cart, starting empty");
                Cart::new()
            }
        };

        CartStore {
            cart: Mutex::new(cart),
            backend,
            key,
            pending: Arc::new(PendingWrites::default()),
        }
    }

    /// Returns a snapshot of the current line items.
    ///
    /// The snapshot is a clone; it does not observe later mutations.
    pub fn products(&self) -> Vec<LineItem> {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        cart.items().to_vec()
    }

    /// Adds a product to the cart.
    ///
    /// New products are appended with quantity 1; a product already in the
    /// cart has its quantity increased by 1 instead (no duplicate entry).
    /// Schedules a best-effort write of the updated state.
    pub fn add_to_cart(&self, candidate: ProductInfo) {
        debug!(id = %candidate.id, "add_to_cart");
        self.mutate(|cart| cart.add_to_cart(&candidate));
    }

    /// Increases the quantity of the item with the given id by 1.
    ///
    /// Unknown ids are a no-op (the unchanged state is still re-persisted).
    pub fn increment(&self, id: &str) {
        debug!(id = %id, "increment");
        self.mutate(|cart| cart.increment(id));
    }

    /// Decreases the quantity of the item with the given id by 1, floored
    /// at zero. The item is never removed from the cart.
    pub fn decrement(&self, id: &str) {
        debug!(id = %id, "decrement");
        self.mutate(|cart| cart.decrement(id));
    }

    /// Waits until every scheduled write has completed.
    ///
    /// Not part of the UI contract; used by tests and shutdown paths that
    /// want the last snapshot on disk before exiting.
    pub async fn flush(&self) {
        loop {
            if self.pending.count.load(Ordering::Acquire) == 0 {
                return;
            }

            // Register the waiter before re-checking, so a completion that
            // lands in between cannot be missed
            let notified = self.pending.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending.count.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Applies a mutation and schedules persistence of the result.
    ///
    /// The snapshot is serialized while the lock is still held: what gets
    /// written is exactly the state this mutation produced, not whatever
    /// the cart holds by the time the write task runs.
    fn mutate<F>(&self, apply: F)
    where
        F: FnOnce(&mut Cart),
    {
        let snapshot = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            apply(&mut cart);
            cart.to_json()
        };

        match snapshot {
            Ok(snapshot) => self.schedule_persist(snapshot),
            Err(e) => warn!(error = %e, "Failed to serialize cart, skipping persistence"),
        }
    }

    /// Spawns the fire-and-forget write of a serialized snapshot.
    ///
    /// Write failures are logged and absorbed: no retry, nothing surfaced
    /// to the caller.
    fn schedule_persist(&self, snapshot: String) {
        let backend = Arc::clone(&self.backend);
        let key = self.key.clone();
        let pending = Arc::clone(&self.pending);

        pending.count.fetch_add(1, Ordering::AcqRel);

        tokio::spawn(async move {
            if let Err(e) = backend.set(&key, &snapshot).await {
                warn!(key = %key, error = %e, "Cart persistence write failed, not retried");
            }

            if pending.count.fetch_sub(1, Ordering::AcqRel) == 1 {
                pending.notify.notify_waiters();
            }
        });
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.products().len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::sqlite::{SqliteBackend, StoreConfig};

    fn apple() -> ProductInfo {
        ProductInfo {
            id: "p1".to_string(),
            title: "Apple".to_string(),
            image_url: "u".to_string(),
            price: 1.5,
        }
    }

    #[tokio::test]
    async fn test_open_with_no_persisted_value_starts_empty() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());

        let store = CartStore::open(backend).await;

        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_open_adopts_persisted_cart() {
        let stored = r#"[{"id":"p2","title":"Pen","imageUrl":"img","price":3.0,"quantity":5}]"#;
        let backend: Arc<dyn StorageBackend> =
            Arc::new(MemoryBackend::with_entry(CART_STORAGE_KEY, stored));

        let store = CartStore::open(backend).await;

        let products = store.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "p2");
        assert_eq!(products[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_open_with_malformed_value_starts_empty() {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(MemoryBackend::with_entry(CART_STORAGE_KEY, "{{corrupt"));

        let store = CartStore::open(backend).await;

        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_updates_state_and_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let store = CartStore::open(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;

        store.add_to_cart(apple());
        store.flush().await;

        // In-memory state
        let products = store.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 1);

        // Persisted state is the POST-mutation snapshot
        let raw = backend.get(CART_STORAGE_KEY).await.unwrap().unwrap();
        let persisted = Cart::from_json(&raw).unwrap();
        assert_eq!(persisted.items(), products.as_slice());
    }

    #[tokio::test]
    async fn test_add_existing_product_delegates_to_increment() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let store = CartStore::open(backend).await;

        store.add_to_cart(apple());
        store.add_to_cart(apple());
        store.add_to_cart(apple());

        let products = store.products();
        assert_eq!(products.len(), 1); // no duplicate entry
        assert_eq!(products[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_increment_unknown_id_leaves_state_unchanged() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let store = CartStore::open(backend).await;
        store.add_to_cart(apple());

        store.increment("nope");

        let products = store.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_decrement_floors_at_zero() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let store = CartStore::open(backend).await;
        store.add_to_cart(apple());

        store.decrement("p1");
        store.decrement("p1"); // already at 0, must stay at 0

        let products = store.products();
        assert_eq!(products.len(), 1); // item lingers, never pruned
        assert_eq!(products[0].quantity, 0);
    }

    #[tokio::test]
    async fn test_cart_survives_restart() {
        let backend = Arc::new(MemoryBackend::new());

        // First session: build up a cart
        {
            let store = CartStore::open(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;
            store.add_to_cart(apple());
            store.increment("p1");
            store.flush().await;
        }

        // Second session: same backend, fresh store
        let store = CartStore::open(backend).await;
        let products = store.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_rapid_mutations_persist_most_recent_state() {
        let backend = Arc::new(MemoryBackend::new());
        let store = CartStore::open(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;

        // Burst of mutations without awaiting in between
        store.add_to_cart(apple());
        store.increment("p1");
        store.increment("p1");
        store.decrement("p1");
        store.flush().await;

        // In-memory and persisted state agree after the burst settles
        // (single-threaded test runtime runs the writes in schedule order)
        let raw = backend.get(CART_STORAGE_KEY).await.unwrap().unwrap();
        let persisted = Cart::from_json(&raw).unwrap();
        assert_eq!(persisted.items(), store.products().as_slice());
        assert_eq!(persisted.items()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_store_over_sqlite_backend() {
        let backend = Arc::new(SqliteBackend::new(StoreConfig::in_memory()).await.unwrap());

        {
            let store = CartStore::open(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;
            store.add_to_cart(apple());
            store.flush().await;
        }

        // Reload from the same database
        let store = CartStore::open(backend).await;
        let products = store.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Apple");
    }

    #[tokio::test]
    async fn test_custom_key_is_respected() {
        let backend = Arc::new(MemoryBackend::new());
        let store = CartStore::open_with_key(
            Arc::clone(&backend) as Arc<dyn StorageBackend>,
            "@GoMarket:CartTest",
        )
        .await;

        store.add_to_cart(apple());
        store.flush().await;

        assert!(backend.get("@GoMarket:CartTest").await.unwrap().is_some());
        assert!(backend.get(CART_STORAGE_KEY).await.unwrap().is_none());
    }
}
