//! # Cart Model
//!
//! The cart data model and its three mutation operations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Mutations                                     │
//! │                                                                         │
//! │  UI Action                 Operation              State Change          │
//! │  ─────────                 ─────────              ────────────          │
//! │                                                                         │
//! │  Tap product ────────────► add_to_cart() ───────► append qty=1, or     │
//! │                                                   delegate to increment │
//! │                                                                         │
//! │  Tap "+" ────────────────► increment(id) ───────► qty += 1             │
//! │                                                                         │
//! │  Tap "−" ────────────────► decrement(id) ───────► qty -= 1 (floor 0)   │
//! │                                                                         │
//! │  NOTE: items are unique by id, and an item is NEVER removed when its   │
//! │        quantity reaches zero (it lingers at qty 0).                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Representation
//! The cart round-trips storage as a bare JSON array of line-item records:
//!
//! ```json
//! [{"id":"p1","title":"Apple","imageUrl":"u","price":1.5,"quantity":2}]
//! ```
//!
//! Field names are camelCase on the wire (`imageUrl`), matching what the
//! mobile shell historically wrote, so existing persisted carts load as-is.

use serde::{Deserialize, Serialize};

use crate::error::CodecResult;

/// A single line item in the cart.
///
/// ## Design Notes
/// - `id` is the product identifier, stable across sessions; items are
///   unique by `id` within a cart.
/// - `quantity` is `u32`: the "never negative" invariant is enforced by the
///   type, and [`Cart::decrement`] saturates at zero.
/// - `price` is a plain numeric unit price. There is no pricing engine in
///   scope; the value is display data frozen when the item was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product ID, unique within the cart
    pub id: String,

    /// Display name
    pub title: String,

    /// Display image reference (`imageUrl` on the wire)
    pub image_url: String,

    /// Unit price
    pub price: f64,

    /// Units of this product in the cart (never negative)
    pub quantity: u32,
}

/// A product descriptor as handed over by the storefront, without quantity.
///
/// This is the input to [`Cart::add_to_cart`]; the cart itself decides the
/// quantity (1 for a new item, +1 for an existing one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Product ID
    pub id: String,

    /// Display name
    pub title: String,

    /// Display image reference
    pub image_url: String,

    /// Unit price
    pub price: f64,
}

impl ProductInfo {
    /// Turns the descriptor into a fresh line item with quantity 1.
    fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

/// The shopping cart: an ordered sequence of line items.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increments quantity)
/// - `quantity >= 0` always (guaranteed by `u32` + saturating decrement)
/// - Items are never removed when quantity reaches 0 (no pruning)
/// - Order is insertion order; new items are appended at the end
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Creates a cart from an existing sequence of line items.
    ///
    /// Used by the store when adopting a loaded cart. The items are taken
    /// as-is; persisted carts are trusted to already satisfy the uniqueness
    /// invariant since every write goes through the mutations below.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Cart { items }
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product not in cart: appended as a new item with `quantity = 1`,
    ///   previous order preserved, new item last.
    /// - Product already in cart: delegates to [`Cart::increment`]; no
    ///   duplicate entry is created.
    pub fn add_to_cart(&mut self, candidate: &ProductInfo) {
        let already_in_cart = self.items.iter().any(|item| item.id == candidate.id);

        if already_in_cart {
            self.increment(&candidate.id);
        } else {
            self.items.push(candidate.clone().into_line_item());
        }
    }

    /// Increases the quantity of the item with the given id by exactly 1.
    ///
    /// Unknown ids are a no-op: nothing is created, nothing changes.
    pub fn increment(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity += 1;
        }
    }

    /// Decreases the quantity of the item with the given id by 1, floored
    /// at zero.
    ///
    /// ## Behavior
    /// - Item at quantity 0 stays at 0 (no underflow).
    /// - The item is NOT removed when it reaches 0; it lingers in the cart.
    /// - Unknown ids are a no-op.
    pub fn decrement(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_sub(1);
        }
    }

    /// Returns the line items as a read-only slice.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Checks if the cart has no items at all.
    ///
    /// Note: a cart whose items all sit at quantity 0 is NOT empty by this
    /// definition; the items still linger.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Encodes the cart into its persisted representation: a JSON array of
    /// line-item records with camelCase field names.
    pub fn to_json(&self) -> CodecResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Decodes a cart from its persisted representation.
    ///
    /// Malformed input is a [`crate::CodecError`], never a panic; the store
    /// maps that to an empty cart on load.
    pub fn from_json(value: &str) -> CodecResult<Self> {
        let items: Vec<LineItem> = serde_json::from_str(value)?;
        Ok(Cart { items })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> ProductInfo {
        ProductInfo {
            id: "p1".to_string(),
            title: "Apple".to_string(),
            image_url: "u".to_string(),
            price: 1.5,
        }
    }

    fn banana() -> ProductInfo {
        ProductInfo {
            id: "p2".to_string(),
            title: "Banana".to_string(),
            image_url: "v".to_string(),
            price: 0.75,
        }
    }

    #[test]
    fn test_add_to_cart_appends_new_item_with_quantity_one() {
        let mut cart = Cart::new();

        cart.add_to_cart(&apple());

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].id, "p1");
        assert_eq!(cart.items()[0].title, "Apple");
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_add_existing_product_increments_without_duplicate() {
        let mut cart = Cart::new();

        cart.add_to_cart(&apple());
        cart.add_to_cart(&apple());
        cart.add_to_cart(&apple());

        assert_eq!(cart.item_count(), 1); // Still one unique item
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_preserves_order_new_item_last() {
        let mut cart = Cart::new();

        cart.add_to_cart(&apple());
        cart.add_to_cart(&banana());

        assert_eq!(cart.items()[0].id, "p1");
        assert_eq!(cart.items()[1].id, "p2");
        assert_eq!(cart.items()[1].quantity, 1);
    }

    #[test]
    fn test_increment_existing_item() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());

        cart.increment("p1");

        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_increment_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());

        cart.increment("nope");

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_decrement_floors_at_zero_and_keeps_item() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());

        cart.decrement("p1");
        assert_eq!(cart.items()[0].quantity, 0);

        // Decrementing again must not underflow, and the item lingers
        cart.decrement("p1");
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 0);
    }

    #[test]
    fn test_decrement_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());

        cart.decrement("nope");

        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_decrement_leaves_other_items_untouched() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());
        cart.add_to_cart(&banana());
        cart.increment("p2");

        cart.decrement("p1");

        assert_eq!(cart.items()[0].quantity, 0);
        assert_eq!(cart.items()[1].quantity, 2);
    }

    #[test]
    fn test_total_quantity_sums_across_items() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());
        cart.add_to_cart(&apple());
        cart.add_to_cart(&banana());

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_json_round_trip_is_equivalent() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());
        cart.add_to_cart(&banana());
        cart.increment("p1");

        let encoded = cart.to_json().unwrap();
        let decoded = Cart::from_json(&encoded).unwrap();

        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_wire_format_uses_camel_case_field_names() {
        let mut cart = Cart::new();
        cart.add_to_cart(&apple());

        let encoded = cart.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        // Persisted shape is a bare array of records with camelCase keys
        let record = &value.as_array().unwrap()[0];
        assert!(record.get("imageUrl").is_some());
        assert!(record.get("image_url").is_none());
        assert_eq!(record["quantity"], 1);
        assert_eq!(record["price"], 1.5);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(Cart::from_json("not json").is_err());
        assert!(Cart::from_json("{\"items\": []}").is_err()); // wrapper object, not array
        assert!(Cart::from_json("[{\"id\": 1}]").is_err()); // wrong field types
    }

    #[test]
    fn test_from_json_accepts_legacy_persisted_cart() {
        let stored = r#"[{"id":"p2","title":"Pen","imageUrl":"img","price":3.0,"quantity":5}]"#;

        let cart = Cart::from_json(stored).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].image_url, "img");
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_empty_cart_encodes_as_empty_array() {
        let cart = Cart::new();
        assert_eq!(cart.to_json().unwrap(), "[]");
        assert!(Cart::from_json("[]").unwrap().is_empty());
    }
}
