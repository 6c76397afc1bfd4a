//! # Cart Demo
//!
//! Exercises the cart store end to end against the SQLite backend.
//!
//! ## Usage
//! ```bash
//! # Run against ./gomarket.db (created if missing)
//! cargo run -p gomarket-store --bin demo
//!
//! # Specify database path
//! GOMARKET_DB_PATH=/tmp/cart-demo.db cargo run -p gomarket-store --bin demo
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p gomarket-store --bin demo
//! ```
//!
//! Run it twice: the second run loads the cart the first run persisted.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gomarket_store::{
    CartProvider, CartStore, ProductInfo, SqliteBackend, StorageBackend, StoreConfig,
};

/// A few storefront products to play with.
fn catalog() -> Vec<ProductInfo> {
    vec![
        ProductInfo {
            id: "bev-001".to_string(),
            title: "Orange Juice 1L".to_string(),
            image_url: "https://img.gomarket.dev/bev-001.png".to_string(),
            price: 3.49,
        },
        ProductInfo {
            id: "snk-014".to_string(),
            title: "Chips Classic".to_string(),
            image_url: "https://img.gomarket.dev/snk-014.png".to_string(),
            price: 2.29,
        },
        ProductInfo {
            id: "dry-007".to_string(),
            title: "Whole Milk".to_string(),
            image_url: "https://img.gomarket.dev/dry-007.png".to_string(),
            price: 1.99,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Storage path from GOMARKET_DB_PATH, default ./gomarket.db
    let config = StoreConfig::from_env();
    info!(path = %config.database_path.display(), "Opening cart storage");

    let backend: Arc<dyn StorageBackend> = Arc::new(SqliteBackend::new(config).await?);
    let store = Arc::new(CartStore::open(backend).await);

    // Wire the provider the way the app shell would
    let mut provider = CartProvider::new();
    provider.install(Arc::clone(&store));
    let cart = provider.cart();

    print_cart("Cart as loaded", &cart);

    for product in catalog() {
        cart.add_to_cart(product);
    }
    cart.increment("bev-001");
    cart.decrement("dry-007");

    print_cart("Cart after this session's shopping", &cart);

    // Make sure the last snapshot is on disk before exiting
    cart.flush().await;
    info!("Cart persisted; run the demo again to see it load");

    Ok(())
}

/// Prints the current cart contents.
fn print_cart(label: &str, cart: &CartStore) {
    let products = cart.products();
    println!("\n{} ({} items):", label, products.len());
    for item in &products {
        println!(
            "  {:<10} {:<20} x{:<3} @ {:.2}",
            item.id, item.title, item.quantity, item.price
        );
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gomarket_store=trace` - Trace the store only
/// - Default: INFO level, sqlx quieted down
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gomarket=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
