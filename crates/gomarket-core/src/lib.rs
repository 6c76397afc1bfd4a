//! # gomarket-core: Pure Business Logic for the GoMarket Cart
//!
//! This crate is the **heart** of the GoMarket cart. It contains the cart
//! data model and mutation logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GoMarket Cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (out of scope)                 │   │
//! │  │    Product list ──► Cart screen ──► Quantity steppers          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    gomarket-store                               │   │
//! │  │    CartStore, CartProvider, StorageBackend (memory / SQLite)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gomarket-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────────────────────┐               │   │
//! │  │   │   cart    │  │           error             │               │   │
//! │  │   │ LineItem  │  │         CodecError          │               │   │
//! │  │   │   Cart    │  │                             │               │   │
//! │  │   └───────────┘  └─────────────────────────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart data model (LineItem, ProductInfo, Cart) and mutations
//! - [`error`] - Codec error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every mutation is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Invariants in Types**: `quantity` is `u32`, so it can never go negative
//! 4. **Explicit Errors**: Codec failures are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use gomarket_core::{Cart, ProductInfo};
//!
//! let mut cart = Cart::new();
//! cart.add_to_cart(&ProductInfo {
//!     id: "p1".to_string(),
//!     title: "Apple".to_string(),
//!     image_url: "https://img/apple.png".to_string(),
//!     price: 1.5,
//! });
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.items()[0].quantity, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gomarket_core::Cart` instead of
// `use gomarket_core::cart::Cart`

pub use cart::{Cart, LineItem, ProductInfo};
pub use error::{CodecError, CodecResult};
