//! # Cart Provider
//!
//! The access scope for the cart contract.
//!
//! ## Why This Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartProvider Scope                                   │
//! │                                                                         │
//! │  App start                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartProvider::new() ── empty scope, no store installed                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  provider.install(store) ── scope becomes active                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  consumer calls provider.cart() ── Arc<CartStore> handed out           │
//! │                                                                         │
//! │  consumer calls cart() BEFORE install ── PANIC, loud and immediate     │
//! │                                                                         │
//! │  Accessing the cart outside an active scope is a programming error:    │
//! │  it must surface during development, never silently default.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use crate::store::CartStore;

/// Holds the active [`CartStore`] and gates consumer access to it.
///
/// A provider starts empty and becomes active once a store is installed.
/// This is the one place in the system that fails loudly: reading the cart
/// through an inactive provider panics, because the only way that happens
/// is an integration mistake (a consumer wired up before the scope is).
#[derive(Debug, Default)]
pub struct CartProvider {
    store: Option<Arc<CartStore>>,
}

impl CartProvider {
    /// Creates an empty (inactive) provider.
    pub fn new() -> Self {
        CartProvider { store: None }
    }

    /// Installs a store, activating the scope.
    pub fn install(&mut self, store: Arc<CartStore>) {
        info!("Cart provider scope activated");
        self.store = Some(store);
    }

    /// Returns true once a store has been installed.
    pub fn is_active(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the active cart store.
    ///
    /// ## Panics
    /// Panics if no store has been installed. This is deliberate: use of
    /// the cart contract outside an active provider scope is a programming
    /// error and must fail immediately, not silently default.
    pub fn cart(&self) -> Arc<CartStore> {
        self.store
            .clone()
            .expect("cart accessed outside an active CartProvider scope")
    }

    /// Non-panicking access for code that wants to probe the scope.
    pub fn try_cart(&self) -> Option<Arc<CartStore>> {
        self.store.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, StorageBackend};

    #[test]
    #[should_panic(expected = "outside an active CartProvider scope")]
    fn test_cart_access_outside_scope_panics() {
        let provider = CartProvider::new();
        let _ = provider.cart();
    }

    #[test]
    fn test_try_cart_outside_scope_is_none() {
        let provider = CartProvider::new();
        assert!(!provider.is_active());
        assert!(provider.try_cart().is_none());
    }

    #[tokio::test]
    async fn test_installed_scope_hands_out_the_store() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let store = Arc::new(CartStore::open(backend).await);

        let mut provider = CartProvider::new();
        provider.install(Arc::clone(&store));

        assert!(provider.is_active());
        assert!(provider.cart().products().is_empty());
    }
}
