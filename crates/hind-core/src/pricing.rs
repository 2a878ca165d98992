//! # Pricing Module
//!
//! Coupon evaluation, discount stacking, and delivery fee computation.
//!
//! ## Checkout Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Pricing Pipeline                            │
//! │                                                                         │
//! │  Cart Subtotal: ₹1,000                                                 │
//! │       │                                                                 │
//! │       ├── First-order discount (₹50 flat, if no prior orders)          │
//! │       │                                                                 │
//! │       ├── Coupon discount (fixed amount or percentage of subtotal)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Discounted = max(0, subtotal − first-order − coupon)   ← clamp FIRST  │
//! │       │                                                                 │
//! │       ├── + Delivery fee (0 for pickup / above free threshold)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Final Total: ₹850                                                     │
//! │                                                                         │
//! │  The clamp runs BEFORE the delivery fee is added, so stacked           │
//! │  discounts can never eat the delivery fee.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Discount Stacking
//! The first-order discount and an applied coupon are additive, not
//! mutually exclusive. There is deliberately no rule preventing stacking.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coupon, CouponKind, DeliveryFees, DeliveryMethod, ShippingScope};

// =============================================================================
// Constants
// =============================================================================

/// Flat discount granted on a customer's first order.
pub const FIRST_ORDER_DISCOUNT: Money = Money::from_rupees(50);

// =============================================================================
// Coupon Evaluation
// =============================================================================

/// Looks up a coupon by code for a given user.
///
/// ## Lookup Rules
/// - Code match is case-insensitive (and trims whitespace)
/// - Coupon must be active
/// - Coupon must be unrestricted, or restricted to exactly this user
///
/// Minimum order value is **not** checked here: that check belongs to
/// apply-time ([`coupon_discount`]), which is where the cart total is known.
pub fn evaluate_coupon<'a>(
    coupons: &'a [Coupon],
    code: &str,
    user_id: &str,
) -> Option<&'a Coupon> {
    coupons
        .iter()
        .find(|c| c.matches_code(code) && c.applies_to(user_id))
}

/// Computes the discount a coupon contributes against a cart subtotal.
///
/// ## Rules
/// - `Fixed(v)` contributes `v` flat, regardless of subtotal
/// - `Percentage(p)` contributes `subtotal × p / 100`
/// - If the coupon declares a `min_order_value` and the subtotal is below
///   it, the coupon is rejected with [`CoreError::CouponBelowMinimum`]
pub fn coupon_discount(coupon: &Coupon, cart_subtotal: Money) -> CoreResult<Money> {
    if let Some(min) = coupon.min_order_value {
        if cart_subtotal < min {
            return Err(CoreError::CouponBelowMinimum {
                required: min,
                subtotal: cart_subtotal,
            });
        }
    }

    let discount = match coupon.kind {
        CouponKind::Fixed(value) => value,
        CouponKind::Percentage(pct) => cart_subtotal.percent_of(pct),
    };

    Ok(discount)
}

// =============================================================================
// Delivery Fee
// =============================================================================

/// Computes the delivery fee for an order.
///
/// ## Rules
/// - In-store pickup: always free
/// - Home delivery at or above `free_delivery_threshold`: free
/// - Otherwise: the local or nationwide fee depending on shipping scope
pub fn delivery_fee(
    method: DeliveryMethod,
    subtotal: Money,
    fees: &DeliveryFees,
    scope: ShippingScope,
) -> Money {
    match method {
        DeliveryMethod::StorePickup => Money::zero(),
        DeliveryMethod::HomeDelivery => {
            if subtotal >= fees.free_delivery_threshold {
                Money::zero()
            } else {
                match scope {
                    ShippingScope::Local => fees.local,
                    ShippingScope::Nationwide => fees.nationwide,
                }
            }
        }
    }
}

// =============================================================================
// Checkout Quote
// =============================================================================

/// Fully priced checkout, line by line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub first_order_discount: Money,
    pub coupon_discount: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl CheckoutQuote {
    /// Total discount applied (first-order + coupon).
    pub fn total_discount(&self) -> Money {
        self.first_order_discount + self.coupon_discount
    }
}

/// Prices a checkout.
///
/// ## Arguments
/// * `subtotal` - cart subtotal from frozen line prices
/// * `is_first_order` - true when the user has zero prior orders
/// * `coupon` - coupon already resolved via [`evaluate_coupon`], if any
/// * `method` / `fees` / `scope` - delivery fee inputs
///
/// ## Errors
/// Propagates [`CoreError::CouponBelowMinimum`] from apply-time coupon
/// rejection.
///
/// ## Worked Example
/// subtotal ₹1,000, 10% coupon, first order:
/// 1000 − 50 − 100 = ₹850; free delivery threshold ≤ 850 → total ₹850.
pub fn quote(
    subtotal: Money,
    is_first_order: bool,
    coupon: Option<&Coupon>,
    method: DeliveryMethod,
    fees: &DeliveryFees,
    scope: ShippingScope,
) -> CoreResult<CheckoutQuote> {
    let first_order_discount = if is_first_order {
        FIRST_ORDER_DISCOUNT
    } else {
        Money::zero()
    };

    let coupon_discount = match coupon {
        Some(c) => self::coupon_discount(c, subtotal)?,
        None => Money::zero(),
    };

    // Clamp before adding the delivery fee: stacked discounts can zero the
    // goods, never the fee.
    let discounted = (subtotal - first_order_discount - coupon_discount).floor_zero();
    let fee = delivery_fee(method, subtotal, fees, scope);

    Ok(CheckoutQuote {
        subtotal,
        first_order_discount,
        coupon_discount,
        delivery_fee: fee,
        total: discounted + fee,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
