//! # Stock & Catalog Mutation
//!
//! Product create / edit / delete, stock and discount edits, customer
//! reviews, and back-in-stock subscriptions.
//!
//! ## Two rules live here
//! - **Back-in-stock fan-out**: an edit that takes stock from 0 to >0
//!   notifies every subscribed user once and clears their subscription
//!   (one-shot, not sticky).
//! - **Delete guard**: a product referenced by any order line item cannot
//!   be deleted. Order history keeps priced snapshots, but the id must
//!   stay resolvable.
//!
//! Placing an order never changes stock. Stock only moves through the
//! explicit edits in this module; overlapping orders do not contend for
//! inventory. Known gap, kept deliberately.

use tracing::{debug, info};

use hind_core::new_entity_id;
use hind_core::types::{Product, Review};
use hind_core::validation::{self, validate_rating};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Adds a new product to the catalog. The id is assigned here.
    pub fn add_product(&mut self, mut product: Product) -> StoreResult<Product> {
        validation::require(&product.name, "product name")?;

        product.id = new_entity_id();
        self.products.push(product.clone());

        info!(product_id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Full replace-by-id edit of a product.
    ///
    /// ## Side effect
    /// When the stored stock was 0 and the edit raises it above 0, every
    /// user subscribed to this product gets a back-in-stock notification
    /// (honoring their `back_in_stock` preference) and is unsubscribed.
    pub fn update_product(&mut self, edited: Product) -> StoreResult<Product> {
        let stored = self.product_mut(&edited.id)?;

        let was_out_of_stock = stored.stock == 0;
        *stored = edited.clone();

        if was_out_of_stock && edited.stock > 0 {
            self.notify_back_in_stock(&edited);
        }

        debug!(product_id = %edited.id, stock = edited.stock, "Product updated");
        Ok(edited)
    }

    /// Removes a product from the catalog.
    ///
    /// ## Errors
    /// [`StoreError::ProductReferencedByOrder`] when any order line item
    /// still references the product id.
    pub fn delete_product(&mut self, product_id: &str) -> StoreResult<()> {
        // Referential integrity: orders keep snapshots, but the id itself
        // must stay resolvable while history references it.
        if let Some(order) = self
            .orders
            .iter()
            .find(|o| o.items.iter().any(|i| i.product_id == product_id))
        {
            return Err(StoreError::ProductReferencedByOrder {
                product_id: product_id.to_string(),
                order_id: order.id.clone(),
            });
        }

        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);
        if self.products.len() == before {
            return Err(StoreError::not_found("Product", product_id));
        }

        info!(product_id, "Product deleted");
        Ok(())
    }

    /// Sets a product's stock level directly.
    ///
    /// Goes through [`Store::update_product`] so a 0 → >0 edit raises the
    /// back-in-stock signal exactly like a full edit would.
    pub fn set_product_stock(&mut self, product_id: &str, stock: u32) -> StoreResult<()> {
        let mut edited = self.product(product_id)?.clone();
        edited.stock = stock;
        self.update_product(edited)?;
        Ok(())
    }

    /// Applies a batch of stock edits one product at a time.
    ///
    /// No rollback: a failing item does not undo earlier items or stop
    /// later ones. The caller gets a per-item result to report.
    pub fn bulk_adjust_stock(
        &mut self,
        changes: &[(String, u32)],
    ) -> Vec<(String, StoreResult<()>)> {
        changes
            .iter()
            .map(|(product_id, stock)| {
                let result = self.set_product_stock(product_id, *stock);
                (product_id.clone(), result)
            })
            .collect()
    }

    /// Applies or clears a product's percentage discount, deriving the
    /// effective discount price.
    pub fn set_product_discount(
        &mut self,
        product_id: &str,
        percentage: Option<u32>,
    ) -> StoreResult<()> {
        if let Some(p) = percentage {
            validation::validate_discount_percentage(p)?;
        }

        let product = self.product_mut(product_id)?;
        product.apply_discount_percentage(percentage);

        debug!(product_id, ?percentage, "Product discount updated");
        Ok(())
    }

    /// Shows or hides a product in the storefront without deleting it.
    pub fn set_product_listed(&mut self, product_id: &str, listed: bool) -> StoreResult<()> {
        let product = self.product_mut(product_id)?;
        product.is_listed = listed;
        debug!(product_id, listed, "Product listing toggled");
        Ok(())
    }

    /// Appends a customer review to a product.
    pub fn add_product_review(
        &mut self,
        product_id: &str,
        author: &str,
        rating: u8,
        comment: String,
    ) -> StoreResult<()> {
        validate_rating(rating)?;

        let product = self.product_mut(product_id)?;
        product.reviews.push(Review {
            author: author.to_string(),
            rating,
            comment,
            date: chrono::Utc::now(),
        });
        Ok(())
    }

    /// Subscribes a user to a back-in-stock alert for a product.
    /// Idempotent; returns whether a new subscription was added.
    pub fn subscribe_back_in_stock(
        &mut self,
        user_id: &str,
        product_id: &str,
    ) -> StoreResult<bool> {
        self.product(product_id)?;

        let user = self.user_mut(user_id)?;
        if user
            .back_in_stock_subscriptions
            .iter()
            .any(|id| id == product_id)
        {
            return Ok(false);
        }
        user.back_in_stock_subscriptions.push(product_id.to_string());
        Ok(true)
    }

    /// Removes a user's back-in-stock subscription, if present.
    pub fn unsubscribe_back_in_stock(
        &mut self,
        user_id: &str,
        product_id: &str,
    ) -> StoreResult<()> {
        let user = self.user_mut(user_id)?;
        user.back_in_stock_subscriptions
            .retain(|id| id != product_id);
        Ok(())
    }

    /// One-shot fan-out: notify every subscriber and clear their
    /// subscription entry.
    fn notify_back_in_stock(&mut self, product: &Product) {
        let mut notified = 0usize;

        for user in &mut self.users {
            let subscribed = user
                .back_in_stock_subscriptions
                .iter()
                .any(|id| *id == product.id);
            if !subscribed {
                continue;
            }

            user.back_in_stock_subscriptions.retain(|id| *id != product.id);
            if user.notification_prefs.back_in_stock {
                Store::push_notification(
                    user,
                    format!("Good news! \"{}\" is back in stock.", product.name),
                );
                notified += 1;
            }
        }

        info!(product_id = %product.id, notified, "Back-in-stock alerts sent");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use hind_core::money::Money;

    fn store() -> Store {
        Store::with_seed(SeedData::demo())
    }

    #[test]
    fn test_add_product_assigns_fresh_id() {
        let mut store = store();
        let mut product = store.product("p-rice").unwrap().clone();
        product.name = "Basmati Rice 10kg".to_string();

        let added = store.add_product(product).unwrap();

        assert_ne!(added.id, "p-rice");
        assert!(store.product(&added.id).is_ok());
    }

    #[test]
    fn test_add_product_requires_name() {
        let mut store = store();
        let mut product = store.product("p-rice").unwrap().clone();
        product.name = "  ".to_string();

        assert!(matches!(
            store.add_product(product),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_update_product_replaces_by_id() {
        let mut store = store();
        let mut edited = store.product("p-rice").unwrap().clone();
        edited.price = Money::from_rupees(520);
        edited.stock = 35;

        store.update_product(edited).unwrap();

        let stored = store.product("p-rice").unwrap();
        assert_eq!(stored.price, Money::from_rupees(520));
        assert_eq!(stored.stock, 35);
    }

    #[test]
    fn test_back_in_stock_fanout_is_one_shot() {
        let mut store = store();
        // p-sugar is out of stock; u-asha and u-vijay are subscribed.
        let asha_before = store.user("u-asha").unwrap().notifications.len();

        store.set_product_stock("p-sugar", 50).unwrap();

        let asha = store.user("u-asha").unwrap();
        assert_eq!(asha.notifications.len(), asha_before + 1);
        assert!(asha
            .notifications
            .last()
            .unwrap()
            .message
            .contains("back in stock"));
        assert!(asha.back_in_stock_subscriptions.is_empty());

        // Stock cycling out and back in does not re-notify: the
        // subscription was consumed.
        store.set_product_stock("p-sugar", 0).unwrap();
        store.set_product_stock("p-sugar", 10).unwrap();
        assert_eq!(
            store.user("u-asha").unwrap().notifications.len(),
            asha_before + 1
        );
    }

    #[test]
    fn test_back_in_stock_respects_preference() {
        let mut store = store();
        // Turn the pref off for u-vijay; his subscription is still consumed.
        store
            .user_mut("u-vijay")
            .unwrap()
            .notification_prefs
            .back_in_stock = false;
        let before = store.user("u-vijay").unwrap().notifications.len();

        store.set_product_stock("p-sugar", 20).unwrap();

        let vijay = store.user("u-vijay").unwrap();
        assert_eq!(vijay.notifications.len(), before);
        assert!(vijay.back_in_stock_subscriptions.is_empty());
    }

    #[test]
    fn test_no_fanout_when_stock_was_not_zero() {
        let mut store = store();
        store.subscribe_back_in_stock("u-asha", "p-rice").unwrap();
        let before = store.user("u-asha").unwrap().notifications.len();

        // 40 → 45 is a restock of an in-stock product, not a comeback.
        store.set_product_stock("p-rice", 45).unwrap();

        assert_eq!(store.user("u-asha").unwrap().notifications.len(), before);
    }

    #[test]
    fn test_delete_guard_blocks_referenced_products() {
        let mut store = store();
        // p-rice appears on seed order 00001
        let err = store.delete_product("p-rice").unwrap_err();
        assert!(matches!(
            err,
            StoreError::ProductReferencedByOrder { .. }
        ));
        assert!(store.product("p-rice").is_ok());
    }

    #[test]
    fn test_delete_unreferenced_product() {
        let mut store = store();
        // p-tea has no seed order lines
        store.delete_product("p-tea").unwrap();
        assert!(store.product("p-tea").is_err());
    }

    #[test]
    fn test_delete_unknown_product_reported() {
        let mut store = store();
        assert!(matches!(
            store.delete_product("ghost"),
            Err(StoreError::NotFound { entity: "Product", .. })
        ));
    }

    #[test]
    fn test_bulk_stock_continues_past_failures() {
        let mut store = store();
        let results = store.bulk_adjust_stock(&[
            ("p-rice".to_string(), 100),
            ("ghost".to_string(), 5),
            ("p-oil".to_string(), 70),
        ]);

        assert!(results[0].1.is_ok());
        assert!(matches!(
            results[1].1,
            Err(StoreError::NotFound { entity: "Product", .. })
        ));
        assert!(results[2].1.is_ok());
        // The failure in the middle rolled nothing back.
        assert_eq!(store.product("p-rice").unwrap().stock, 100);
        assert_eq!(store.product("p-oil").unwrap().stock, 70);
    }

    #[test]
    fn test_discount_derives_price_and_clears() {
        let mut store = store();
        store.set_product_discount("p-rice", Some(20)).unwrap();

        let product = store.product("p-rice").unwrap();
        assert_eq!(product.discount_percentage, Some(20));
        assert_eq!(product.discount_price, Some(Money::from_rupees(400)));

        store.set_product_discount("p-rice", None).unwrap();
        let product = store.product("p-rice").unwrap();
        assert_eq!(product.discount_percentage, None);
        assert_eq!(product.discount_price, None);
    }

    #[test]
    fn test_discount_percentage_validated() {
        let mut store = store();
        assert!(store.set_product_discount("p-rice", Some(0)).is_err());
        assert!(store.set_product_discount("p-rice", Some(101)).is_err());
    }

    #[test]
    fn test_subscription_is_idempotent() {
        let mut store = store();
        assert!(store.subscribe_back_in_stock("u-asha", "p-tea").unwrap());
        assert!(!store.subscribe_back_in_stock("u-asha", "p-tea").unwrap());

        store.unsubscribe_back_in_stock("u-asha", "p-tea").unwrap();
        let user = store.user("u-asha").unwrap();
        assert!(!user
            .back_in_stock_subscriptions
            .iter()
            .any(|id| id == "p-tea"));
    }

    #[test]
    fn test_review_appended_and_rating_validated() {
        let mut store = store();
        store
            .add_product_review("p-rice", "Asha Devi", 5, "Excellent grain".to_string())
            .unwrap();
        assert_eq!(store.product("p-rice").unwrap().reviews.len(), 1);

        assert!(store
            .add_product_review("p-rice", "Asha Devi", 0, "?".to_string())
            .is_err());
    }

    #[test]
    fn test_listing_toggle() {
        let mut store = store();
        store.set_product_listed("p-rice", false).unwrap();
        assert!(!store.product("p-rice").unwrap().is_listed);
    }
}
