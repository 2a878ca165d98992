//! # Error Types
//!
//! Domain-specific error types for hind-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hind-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations (pricing, cart)       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  hind-store errors (separate crate)                                    │
//! │  └── StoreError       - Mutation failures (not found, guards)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Presentation layer   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, ids, limits)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart total fell short of a coupon's minimum order value.
    ///
    /// ## When This Occurs
    /// - Coupon is looked up successfully but rejected at apply-time
    ///   because `min_order_value` is not met
    #[error("Order must be at least {required} to use this coupon (cart is {subtotal})")]
    CouponBelowMinimum { required: Money, subtotal: Money },

    /// Coupon exists but cannot be used (inactive or restricted to
    /// another user).
    #[error("Coupon '{code}' is not valid for this account")]
    CouponNotApplicable { code: String },

    /// Requested quantity exceeds available stock or the per-order cap.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check: min(stock, max_order_quantity) = 3
    ///      │
    ///      ▼
    /// QuantityUnavailable { product: "Basmati Rice", requested: 5, available: 3 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 available"
    /// ```
    #[error("Only {available} of {product} available, requested {requested}")]
    QuantityUnavailable {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Operation requires a non-empty cart.
    #[error("Cart is empty")]
    CartEmpty,

    /// Quantity update targeted a product that is not in the cart.
    #[error("{product} is not in the cart")]
    ProductNotInCart { product: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed pincode, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate email at signup).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
