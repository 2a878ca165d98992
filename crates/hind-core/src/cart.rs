//! # Cart Module
//!
//! The shopping cart and wishlist, as pure in-memory collections.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Session Call            Cart Change           │
//! │  ─────────────────        ────────────            ───────────           │
//! │                                                                         │
//! │  Click "Add" ────────────► add_item() ──────────► items.push(item)     │
//! │                                                    (qty clamped)        │
//! │  Change Quantity ────────► update_quantity() ───► items[i].qty = n     │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  Checkout succeeds ──────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Every cart change is mirrored to the persisted session file by the    │
//! │  session layer in hind-store; this module stays pure.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product, UserRole};
use crate::validation::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Quantity is clamped to `min(requested, stock, max_order_quantity)`
/// - Quantity is always > 0 (setting it to 0 removes the item)
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart, or increases its quantity if present.
    ///
    /// ## Behavior
    /// - The requested quantity is clamped to the product's order cap
    ///   (`min(stock, max_order_quantity)`), counting what is already in
    ///   the cart
    /// - The unit price is frozen at add time for the given role
    ///
    /// ## Returns
    /// The quantity now in the cart for this product.
    ///
    /// ## Errors
    /// [`CoreError::QuantityUnavailable`] when the cap leaves no room for
    /// even one more unit (out of stock, or cap already reached).
    pub fn add_item(
        &mut self,
        product: &Product,
        role: UserRole,
        quantity: u32,
    ) -> CoreResult<u32> {
        let cap = product.order_quantity_cap().min(MAX_ITEM_QUANTITY);

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            let clamped = (item.quantity + quantity).min(cap);
            if clamped <= item.quantity {
                return Err(CoreError::QuantityUnavailable {
                    product: product.name.clone(),
                    requested: item.quantity + quantity,
                    available: cap,
                });
            }
            item.quantity = clamped;
            return Ok(clamped);
        }

        let clamped = quantity.min(cap);
        if clamped == 0 {
            return Err(CoreError::QuantityUnavailable {
                product: product.name.clone(),
                requested: quantity,
                available: cap,
            });
        }

        self.items.push(CartItem::from_product(product, role, clamped));
        Ok(clamped)
    }

    /// Sets the quantity of an item already in the cart.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the item
    /// - Otherwise the quantity is clamped to the product's order cap
    pub fn update_quantity(&mut self, product: &Product, quantity: u32) -> CoreResult<u32> {
        if quantity == 0 {
            self.remove_item(&product.id);
            return Ok(0);
        }

        let cap = product.order_quantity_cap().min(MAX_ITEM_QUANTITY);
        let clamped = quantity.min(cap);
        if clamped == 0 {
            return Err(CoreError::QuantityUnavailable {
                product: product.name.clone(),
                requested: quantity,
                available: cap,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => {
                item.quantity = clamped;
                Ok(clamped)
            }
            None => Err(CoreError::ProductNotInCart {
                product: product.name.clone(),
            }),
        }
    }

    /// Removes an item by product id. Removing a non-member is a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all items (checkout success, or explicit clear).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of unique products in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal from the frozen line prices.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Money::zero(), |a, b| a + b)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// The wishlist: a set of product ids.
///
/// ## Invariants (set semantics)
/// - Adding an id twice results in exactly one entry (idempotent add)
/// - Removing a non-member id is a no-op
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub product_ids: Vec<String>,
}

impl Wishlist {
    /// Creates a new empty wishlist.
    pub fn new() -> Self {
        Wishlist {
            product_ids: Vec::new(),
        }
    }

    /// Adds a product id. Returns true if it was newly added.
    pub fn add(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.product_ids.push(product_id.to_string());
        true
    }

    /// Removes a product id. Returns true if it was present.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.product_ids.len();
        self.product_ids.retain(|id| id != product_id);
        self.product_ids.len() != before
    }

    /// Toggles membership; returns the new membership state.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.remove(product_id) {
            false
        } else {
            self.add(product_id)
        }
    }

    /// Membership check.
    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
