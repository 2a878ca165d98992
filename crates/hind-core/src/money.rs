//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    ₹10.00 / 3 = ₹3.33 (×3 = ₹9.99)  → Lost ₹0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    1000 paise / 3 = 333 paise (×3 = 999 paise)                         │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hind_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(109_900); // ₹1,099.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_rupees(50);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(1099.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► CartItem.unit_price_at_add ──► Cart.subtotal     │
/// │                  │                                                      │
/// │                  └──► Displayed as "₹1,099" in the storefront          │
/// │                                                                         │
/// │  Cart.subtotal ──► Discounts ──► Delivery Fee ──► Order.total          │
/// │                                                                         │
/// │  Order.total ──► Wallet refund credit ──► User.wallet_balance          │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Why Paise?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The store, calculations, and API all use paise.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use hind_core::money::Money;
    ///
    /// let fee = Money::from_rupees(50); // ₹50.00
    /// assert_eq!(fee.paise(), 5000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns `percent`% of this amount, rounded half-up at paise precision.
    ///
    /// ## Implementation
    /// Integer math with i128 intermediates to prevent overflow:
    /// `(amount * percent + 50) / 100`
    ///
    /// ## Example
    /// ```rust
    /// use hind_core::money::Money;
    ///
    /// let subtotal = Money::from_rupees(1000); // ₹1,000.00
    /// let discount = subtotal.percent_of(10);  // 10% coupon
    /// assert_eq!(discount, Money::from_rupees(100));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Cart Subtotal: ₹1,000
    ///      │
    ///      ▼
    /// percent_of(10) ← THIS FUNCTION (percentage coupon)
    ///      │
    ///      ▼
    /// Discount: ₹100
    /// ```
    pub fn percent_of(&self, percent: u32) -> Money {
        let paise = (self.0 as i128 * percent as i128 + 50) / 100;
        Money::from_paise(paise as i64)
    }

    /// Clamps a negative value up to zero, leaving positive values untouched.
    ///
    /// Used when subtracting stacked discounts from a subtotal: the
    /// discounted subtotal is floored at zero *before* the delivery fee is
    /// added, so a delivery fee can never be discounted away.
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use hind_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(29_900); // ₹299.00
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.paise(), 89_700); // ₹897.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and notification strings. Use frontend formatting
/// for actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(109_999);
        assert_eq!(money.paise(), 109_999);
        assert_eq!(money.rupees(), 1099);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(50);
        assert_eq!(money.paise(), 5000);

        let negative = Money::from_rupees(-5);
        assert_eq!(negative.paise(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(109_900)), "₹1099.00");
        assert_eq!(format!("{}", Money::from_paise(550)), "₹5.50");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_percent_of() {
        // ₹1,000 at 10% = ₹100
        let subtotal = Money::from_rupees(1000);
        assert_eq!(subtotal.percent_of(10), Money::from_rupees(100));

        // Rounding: ₹0.05 at 50% = 2.5 paise → 3 paise (half-up)
        let tiny = Money::from_paise(5);
        assert_eq!(tiny.percent_of(50).paise(), 3);
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Money::from_paise(-100).floor_zero(), Money::zero());
        assert_eq!(Money::from_paise(100).floor_zero().paise(), 100);
        assert_eq!(Money::zero().floor_zero(), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paise(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_paise(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(29_900);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.paise(), 89_700);
    }

    /// Critical test: Verify that ₹10.00 / 3 × 3 behaves as expected
    /// This documents the intentional precision loss
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_rupees = Money::from_paise(1000);
        let one_third = Money::from_paise(1000 / 3); // 333 paise
        let reconstructed: Money = one_third * 3; // 999 paise

        assert_eq!(reconstructed.paise(), 999);
        assert_ne!(reconstructed.paise(), ten_rupees.paise());

        let lost = ten_rupees - reconstructed;
        assert_eq!(lost.paise(), 1);
    }
}
