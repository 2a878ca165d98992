//! # Store Module
//!
//! The in-memory entity store and its mutation surface.
//!
//! ## Mutation API Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutation API Pattern                                 │
//! │                                                                         │
//! │  The Store owns every entity collection and exposes the only way to    │
//! │  mutate them. The presentation layer never touches a collection.       │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  shared.with_store_mut(|s| s.place_order(draft))               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  Store (single writer, synchronous)                                    │
//! │  ├── place_order / update_order_status / approve_order_payment  (orders)│
//! │  ├── update_user_wallet / update_user_khata                    (wallet)│
//! │  ├── update_product / delete_product / set_product_stock      (catalog)│
//! │  ├── sign_up / authenticate / update_profile                    (users)│
//! │  ├── add_coupon / set_coupon_active                           (coupons)│
//! │  └── open_ticket / add_expense                        (tickets, ledger)│
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • No hidden ambient state: the store is injected into callers         │
//! │  • Every by-id mutation reports not-found (no silent no-ops)           │
//! │  • Straightforward to test without mocks                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Submodules
//!
//! - [`orders`] - Order lifecycle engine (place, transition, approve, cancel)
//! - [`wallet`] - Wallet balance adjustments and khata terms
//! - [`catalog`] - Product CRUD, stock, back-in-stock fan-out
//! - [`users`] - Accounts, authentication, notification preferences
//! - [`coupons`] - Coupon CRUD and apply-time evaluation
//! - [`tickets`] - Support ticket threads
//! - [`expenses`] - Expense ledger CRUD

pub mod catalog;
pub mod coupons;
pub mod expenses;
pub mod orders;
pub mod tickets;
pub mod users;
pub mod wallet;

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use hind_core::types::{
    new_entity_id, Coupon, Expense, Notification, Order, Product, StoreConfig, SupportTicket,
    User,
};
use hind_core::validation::validate_pincode;

use crate::error::{StoreError, StoreResult};
use crate::seed::SeedData;

// =============================================================================
// Store
// =============================================================================

/// The entity store: every collection, one owner.
///
/// ## Concurrency Model
/// Single-writer, synchronous: every mutation runs to completion before the
/// next starts. There is no locking discipline inside the store itself;
/// callers that share it across threads wrap it in [`SharedStore`].
#[derive(Debug)]
pub struct Store {
    pub(crate) users: Vec<User>,
    pub(crate) products: Vec<Product>,
    /// Kept sorted descending by date (newest first).
    pub(crate) orders: Vec<Order>,
    pub(crate) coupons: Vec<Coupon>,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) tickets: Vec<SupportTicket>,
    pub(crate) config: StoreConfig,
}

impl Store {
    /// Creates an empty store with the given configuration.
    pub fn empty(config: StoreConfig) -> Self {
        Store {
            users: Vec::new(),
            products: Vec::new(),
            orders: Vec::new(),
            coupons: Vec::new(),
            expenses: Vec::new(),
            tickets: Vec::new(),
            config,
        }
    }

    /// Creates a store populated from seed fixtures.
    ///
    /// The seed stands in for what would be a database in a real
    /// deployment: it is loaded once at startup and mutated only through
    /// the Mutation API from then on.
    pub fn with_seed(seed: SeedData) -> Self {
        debug!(
            users = seed.users.len(),
            products = seed.products.len(),
            orders = seed.orders.len(),
            "Loading seed data into store"
        );

        let mut store = Store {
            users: seed.users,
            products: seed.products,
            orders: seed.orders,
            coupons: seed.coupons,
            expenses: seed.expenses,
            tickets: seed.tickets,
            config: seed.config,
        };
        // Seed orders may arrive in any order; the store invariant is
        // newest-first.
        store.orders.sort_by(|a, b| b.date.cmp(&a.date));
        store
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Orders, newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn tickets(&self) -> &[SupportTicket] {
        &self.tickets
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Looks up a user by id.
    pub fn user(&self, user_id: &str) -> StoreResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::not_found("User", user_id))
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> StoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }

    /// Looks up an order by id.
    pub fn order(&self, order_id: &str) -> StoreResult<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| StoreError::not_found("Order", order_id))
    }

    // -------------------------------------------------------------------------
    // Configuration mutation
    // -------------------------------------------------------------------------

    /// Replaces the store configuration wholesale (back-office settings
    /// form submits the full object).
    pub fn set_config(&mut self, config: StoreConfig) {
        debug!("Store configuration replaced");
        self.config = config;
    }

    /// Adds a pincode to the serviceable allow-list. Idempotent.
    pub fn add_serviceable_pincode(&mut self, pincode: &str) -> StoreResult<bool> {
        validate_pincode(pincode)?;
        let pincode = pincode.trim();

        if self.config.serviceable_pincodes.iter().any(|p| p == pincode) {
            return Ok(false);
        }
        self.config.serviceable_pincodes.push(pincode.to_string());
        Ok(true)
    }

    /// Removes a pincode from the serviceable allow-list.
    pub fn remove_serviceable_pincode(&mut self, pincode: &str) -> bool {
        let before = self.config.serviceable_pincodes.len();
        self.config.serviceable_pincodes.retain(|p| p != pincode);
        self.config.serviceable_pincodes.len() != before
    }

    // -------------------------------------------------------------------------
    // Internal helpers shared by the mutation submodules
    // -------------------------------------------------------------------------

    pub(crate) fn user_mut(&mut self, user_id: &str) -> StoreResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::not_found("User", user_id))
    }

    pub(crate) fn product_mut(&mut self, product_id: &str) -> StoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }

    pub(crate) fn order_mut(&mut self, order_id: &str) -> StoreResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| StoreError::not_found("Order", order_id))
    }

    /// Appends a notification to a user, unconditionally.
    ///
    /// Preference gating happens at call sites: only order-status updates
    /// are gated on `notification_prefs.order_status`.
    pub(crate) fn push_notification(user: &mut User, message: String) {
        user.notifications.push(Notification {
            id: new_entity_id(),
            message,
            date: Utc::now(),
            read: false,
        });
    }
}

// =============================================================================
// Shared Store
// =============================================================================

/// Shared handle to the store for embedding hosts.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Store>>` because:
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one caller mutates the store at a time
///
/// ## Why Not RwLock?
/// Store operations are quick, and most operations modify state.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps a store in a shared handle.
    pub fn new(store: Store) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = shared.with_store(|s| s.orders().len());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.inner.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_store_mut(|s| s.place_order(draft))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.inner.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn test_with_seed_sorts_orders_newest_first() {
        let store = Store::with_seed(SeedData::demo());

        let dates: Vec<_> = store.orders().iter().map(|o| o.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_lookup_not_found_is_reported() {
        let store = Store::with_seed(SeedData::demo());

        assert!(matches!(
            store.order("99999"),
            Err(StoreError::NotFound { entity: "Order", .. })
        ));
        assert!(matches!(
            store.user("missing"),
            Err(StoreError::NotFound { entity: "User", .. })
        ));
    }

    #[test]
    fn test_serviceable_pincode_mutation() {
        let mut store = Store::with_seed(SeedData::demo());

        assert!(store.add_serviceable_pincode("560001").unwrap());
        assert!(!store.add_serviceable_pincode("560001").unwrap()); // idempotent
        assert!(store.add_serviceable_pincode("0001").is_err()); // malformed

        assert!(store.remove_serviceable_pincode("560001"));
        assert!(!store.remove_serviceable_pincode("560001"));
    }

    #[test]
    fn test_shared_store_closures() {
        let shared = SharedStore::new(Store::with_seed(SeedData::demo()));

        let products = shared.with_store(|s| s.products().len());
        assert!(products > 0);

        let shared2 = shared.clone();
        shared2.with_store_mut(|s| {
            s.remove_serviceable_pincode("110001");
        });
    }
}
