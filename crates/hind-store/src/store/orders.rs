//! # Order Lifecycle Engine
//!
//! Order placement, status transitions, payment approval, cancellation,
//! and the cancellation refund rule.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Machine                                  │
//! │                                                                         │
//! │  Pending ──► Approved ──► Packed ──► Out for Delivery ──► Delivered    │
//! │     │                                                      (terminal)   │
//! │     ├──► Rejected  (terminal)                                           │
//! │     └──► Cancelled (terminal)                                           │
//! │                                                                         │
//! │  Terminal states are enforced HERE, not in the UI: any transition out  │
//! │  of Delivered / Rejected / Cancelled fails with OrderAlreadyTerminal.  │
//! │  That guard is also what makes the refund rule idempotent: a second    │
//! │  Cancelled transition is rejected before the refund can run again.     │
//! │                                                                         │
//! │  Refund rule (one place only):                                         │
//! │    Cancelled ∧ payment_approved ∧ method ≠ Cash on Delivery            │
//! │      → credit order total to the customer's wallet                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Wallet Checkout
//! "Pay from Wallet" performs the balance check, the wallet debit, and the
//! order insert inside `place_order` as one commit unit: all checks run
//! before the first write, and no write can fail once writing starts.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hind_core::error::CoreError;
use hind_core::money::Money;
use hind_core::pricing;
use hind_core::types::{
    CartItem, DeliveryMethod, DeliveryReview, InternalNote, Order, OrderStatus, PaymentMethod,
};
use hind_core::validation::{validate_coupon_code, validate_rating};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

// =============================================================================
// Inputs and Outcomes
// =============================================================================

/// Everything checkout needs to place an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub payment_method: PaymentMethod,
    /// Base64 proof image, uploaded with Manual Transfer checkouts.
    pub payment_screenshot: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub delivery_slot: Option<String>,
    pub coupon_code: Option<String>,
    pub customer_notes: Option<String>,
}

/// Outcome of a status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChange {
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// Amount credited back to the customer's wallet, when the refund
    /// rule fired.
    pub refund: Option<Money>,
}

// =============================================================================
// Mutation API
// =============================================================================

impl Store {
    /// Places a new order from a checkout draft.
    ///
    /// ## Behavior
    /// - Order id is `max(existing numeric ids) + 1`, zero-padded to 5
    ///   digits
    /// - Status starts at Pending, `date` is stamped now
    /// - Cash on Delivery always starts with `payment_approved = false`
    ///   (approval happens implicitly at delivery)
    /// - Pay from Wallet debits the wallet here, atomically with the order
    ///   insert, and starts with `payment_approved = true`
    /// - The order list stays sorted newest-first
    ///
    /// ## Errors
    /// - [`CoreError::CartEmpty`] for an empty draft
    /// - [`CoreError::QuantityUnavailable`] when a line exceeds the
    ///   product's current order cap
    /// - [`CoreError::CouponNotApplicable`] / [`CoreError::CouponBelowMinimum`]
    ///   for coupon failures
    /// - [`StoreError::InsufficientWalletFunds`] / [`StoreError::WalletNotEnabled`]
    ///   for wallet checkouts, before anything is written
    pub fn place_order(&mut self, draft: OrderDraft) -> StoreResult<Order> {
        let user = self.user(&draft.user_id)?.clone();

        if draft.items.is_empty() {
            return Err(CoreError::CartEmpty.into());
        }

        // Stock limits are re-checked against the live catalog. A line whose
        // product has since been deleted keeps its snapshot unchecked.
        for item in &draft.items {
            if let Ok(product) = self.product(&item.product_id) {
                let cap = product.order_quantity_cap();
                if item.quantity > cap {
                    return Err(CoreError::QuantityUnavailable {
                        product: product.name.clone(),
                        requested: item.quantity,
                        available: cap,
                    }
                    .into());
                }
            }
        }

        let subtotal = draft
            .items
            .iter()
            .map(CartItem::line_total)
            .fold(Money::zero(), |a, b| a + b);

        // "First order" is judged by email so it survives account re-creation.
        let is_first_order = !self
            .orders
            .iter()
            .any(|o| o.user.email.eq_ignore_ascii_case(&user.email));

        let coupon = match &draft.coupon_code {
            Some(code) => {
                validate_coupon_code(code)?;
                let coupon = pricing::evaluate_coupon(&self.coupons, code, &user.id)
                    .ok_or_else(|| CoreError::CouponNotApplicable { code: code.clone() })?;
                Some(coupon.clone())
            }
            None => None,
        };

        let quote = pricing::quote(
            subtotal,
            is_first_order,
            coupon.as_ref(),
            draft.delivery_method,
            &self.config.delivery_fees,
            self.config.shipping_scope,
        )?;

        let id = Order::format_id(self.next_order_seq());

        // The checked debit is the last fallible step: if it fails, nothing
        // has been written; once it succeeds, the insert below cannot fail.
        if draft.payment_method == PaymentMethod::PayFromWallet {
            self.debit_wallet_checked(&user.id, quote.total, &format!("Payment for order #{id}"))?;
        }

        let order = Order {
            id: id.clone(),
            user: user.details(),
            items: draft.items,
            total: quote.total,
            status: OrderStatus::Pending,
            date: Utc::now(),
            delivered_date: None,
            payment_method: draft.payment_method,
            payment_screenshot: draft.payment_screenshot,
            // A wallet debit already satisfied payment; every other method
            // starts unapproved.
            payment_approved: draft.payment_method == PaymentMethod::PayFromWallet,
            delivery_method: draft.delivery_method,
            delivery_slot: draft.delivery_slot,
            delivery_review: None,
            internal_notes: Vec::new(),
            discount_applied: quote.total_discount(),
            coupon_applied: coupon.map(|c| c.code),
            delivery_fee_applied: quote.delivery_fee,
            customer_notes: draft.customer_notes,
        };

        // Newest first.
        self.orders.insert(0, order.clone());

        let user = self.user_mut(&order.user.user_id)?;
        Store::push_notification(user, format!("Your order #{id} has been placed."));

        info!(
            order_id = %id,
            total = %order.total,
            method = %order.payment_method,
            "Order placed"
        );

        Ok(order)
    }

    /// Transitions an order to a new status.
    ///
    /// ## Effects
    /// 1. The status field is updated
    /// 2. Delivered stamps `delivered_date`
    /// 3. The refund rule runs on Cancelled (see module docs)
    /// 4. The customer gets a status notification, if their
    ///    `order_status` preference allows it
    ///
    /// ## Errors
    /// - [`StoreError::NotFound`] for an unknown order id
    /// - [`StoreError::OrderAlreadyTerminal`] when the order is already
    ///   Delivered, Rejected, or Cancelled
    pub fn update_order_status(
        &mut self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> StoreResult<OrderStatusChange> {
        let order = self.order_mut(order_id)?;
        let from = order.status;

        if from.is_terminal() {
            return Err(StoreError::OrderAlreadyTerminal {
                order_id: order.id.clone(),
                status: from,
            });
        }

        order.status = new_status;
        if new_status == OrderStatus::Delivered {
            order.delivered_date = Some(Utc::now());
        }

        let id = order.id.clone();
        let user_id = order.user.user_id.clone();
        let total = order.total;
        let refundable = order.payment_approved && order.payment_method.is_refundable();

        // Refund rule: the ONE place a status change moves money. The
        // terminal guard above guarantees the prior status was neither
        // Delivered nor already Cancelled, so this cannot double-credit.
        let refund = if new_status == OrderStatus::Cancelled && refundable {
            self.update_user_wallet(&user_id, total, &format!("Refund for cancelled order #{id}"))?;
            Some(total)
        } else {
            None
        };

        let user = self.user_mut(&user_id)?;
        if user.notification_prefs.order_status {
            Store::push_notification(
                user,
                format!("Your order #{id} has been updated to: {new_status}"),
            );
        }

        debug!(order_id = %id, from = %from, to = %new_status, refunded = refund.is_some(), "Order status updated");

        Ok(OrderStatusChange {
            order_id: id,
            from,
            to: new_status,
            refund,
        })
    }

    /// Approves a manually-paid order's payment.
    ///
    /// ## Preconditions (enforced, not advisory)
    /// - Payment method is Manual Transfer or Pay on Khata
    /// - Order status is Pending
    ///
    /// Sets `payment_approved = true` and advances the order to Approved.
    pub fn approve_order_payment(&mut self, order_id: &str) -> StoreResult<()> {
        let order = self.order_mut(order_id)?;

        if !order.payment_method.requires_manual_approval() {
            return Err(StoreError::PaymentNotApprovable {
                method: order.payment_method.to_string(),
            });
        }
        if order.status != OrderStatus::Pending {
            return Err(StoreError::InvalidOrderState {
                order_id: order.id.clone(),
                status: order.status,
                action: "approve payment",
            });
        }

        order.payment_approved = true;
        order.status = OrderStatus::Approved;

        let id = order.id.clone();
        let user_id = order.user.user_id.clone();

        let user = self.user_mut(&user_id)?;
        if user.notification_prefs.order_status {
            Store::push_notification(
                user,
                format!("Payment received! Your order #{id} is now Approved."),
            );
        }

        info!(order_id = %id, "Order payment approved");
        Ok(())
    }

    /// Customer-initiated cancellation.
    ///
    /// Allowed only while the order is still Pending; delegates to the
    /// unified [`Store::update_order_status`] path so the refund rule
    /// lives in exactly one place.
    pub fn cancel_order(&mut self, order_id: &str) -> StoreResult<OrderStatusChange> {
        let order = self.order(order_id)?;
        if order.status != OrderStatus::Pending {
            return Err(StoreError::InvalidOrderState {
                order_id: order.id.clone(),
                status: order.status,
                action: "cancel",
            });
        }

        self.update_order_status(order_id, OrderStatus::Cancelled)
    }

    /// Admin wholesale edit of an order (items, customer details, notes).
    ///
    /// ## Behavior
    /// - `total` is recomputed here from the edited items and the recorded
    ///   discount/delivery fee; the caller's total is ignored
    /// - `status`, `payment_approved`, and `delivered_date` are preserved
    ///   from the stored order: transitions go through
    ///   [`Store::update_order_status`], never through an edit
    pub fn update_order(&mut self, edited: Order) -> StoreResult<Order> {
        let stored = self.order_mut(&edited.id)?;

        let mut next = edited;
        next.total = (next.items_subtotal() - next.discount_applied).floor_zero()
            + next.delivery_fee_applied;
        next.status = stored.status;
        next.payment_approved = stored.payment_approved;
        next.delivered_date = stored.delivered_date;

        *stored = next.clone();

        debug!(order_id = %next.id, total = %next.total, "Order edited");
        Ok(next)
    }

    /// Attaches a payment proof screenshot (Manual Transfer / Khata).
    pub fn attach_payment_screenshot(
        &mut self,
        order_id: &str,
        screenshot: String,
    ) -> StoreResult<()> {
        let order = self.order_mut(order_id)?;

        if !order.payment_method.requires_manual_approval() {
            return Err(StoreError::PaymentNotApprovable {
                method: order.payment_method.to_string(),
            });
        }

        order.payment_screenshot = Some(screenshot);
        Ok(())
    }

    /// Records the customer's delivery review on a delivered order.
    pub fn record_delivery_review(
        &mut self,
        order_id: &str,
        rating: u8,
        comment: String,
    ) -> StoreResult<()> {
        validate_rating(rating)?;

        let order = self.order_mut(order_id)?;
        if order.status != OrderStatus::Delivered {
            return Err(StoreError::InvalidOrderState {
                order_id: order.id.clone(),
                status: order.status,
                action: "review delivery",
            });
        }

        order.delivery_review = Some(DeliveryReview {
            rating,
            comment,
            date: Utc::now(),
            admin_response: None,
        });
        Ok(())
    }

    /// Admin response to an existing delivery review.
    pub fn respond_to_delivery_review(
        &mut self,
        order_id: &str,
        response: String,
    ) -> StoreResult<()> {
        let order = self.order_mut(order_id)?;

        match order.delivery_review.as_mut() {
            Some(review) => {
                review.admin_response = Some(response);
                Ok(())
            }
            None => Err(StoreError::not_found("Delivery review", order_id)),
        }
    }

    /// Appends an admin-only audit note to an order.
    pub fn add_internal_note(
        &mut self,
        order_id: &str,
        author: &str,
        text: String,
    ) -> StoreResult<()> {
        let order = self.order_mut(order_id)?;
        order.internal_notes.push(InternalNote {
            author: author.to_string(),
            text,
            date: Utc::now(),
        });
        Ok(())
    }

    /// The next sequential order number.
    fn next_order_seq(&self) -> u64 {
        self.orders
            .iter()
            .filter_map(|o| o.numeric_id())
            .max()
            .unwrap_or(0)
            + 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
