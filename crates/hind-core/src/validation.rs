//! # Validation Module
//!
//! Input validation utilities for Hind General Store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Format validation (pincode, email, mobile)                        │
//! │  └── Business rule validation (amounts, ratings)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store mutation guards (hind-store)                           │
//! │  ├── Referential integrity (product delete guard)                      │
//! │  └── State machine guards (terminal orders)                            │
//! │                                                                         │
//! │  Defense in depth: the store never trusts the frontend's checks        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hind_core::validation::{validate_pincode, validate_quantity};
//!
//! // Validate pincode before confirming a delivery address
//! validate_pincode("110001").unwrap();
//!
//! // Validate quantity before a cart operation
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only required fields.
pub fn require(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an Indian postal PIN code.
///
/// ## Rules
/// - Exactly 6 ASCII digits
/// - First digit must not be zero (no PIN zone 0 exists)
///
/// ## Example
/// ```rust
/// use hind_core::validation::validate_pincode;
///
/// assert!(validate_pincode("110001").is_ok());
/// assert!(validate_pincode("011001").is_err());
/// assert!(validate_pincode("1100").is_err());
/// ```
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let pincode = pincode.trim();

    if pincode.is_empty() {
        return Err(ValidationError::Required {
            field: "pincode".to_string(),
        });
    }

    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must be exactly 6 digits".to_string(),
        });
    }

    if pincode.starts_with('0') {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must not start with 0".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one '@' with non-empty local part and a domain
///   containing a '.'
///
/// Intentionally loose: the address is a login identity here, not a
/// deliverability guarantee.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let ok = parts.next().is_none()
        && !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if !ok {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a 10-digit Indian mobile number.
pub fn validate_mobile(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Err(ValidationError::Required {
            field: "mobile".to_string(),
        });
    }

    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile".to_string(),
            reason: "must be exactly 10 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 30 characters
/// - Alphanumeric only (codes are matched case-insensitively)
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 30,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters and numbers".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Maximum quantity of a single item in one order.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Per-product caps (`max_order_quantity`) tighten this further.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates an expense amount.
///
/// ## Rules
/// - Must be strictly positive (a zero or negative expense is a data
///   entry mistake, not a refund)
pub fn validate_expense_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "expense amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a review rating.
///
/// ## Rules
/// - Must be between 1 and 5 stars
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 1 and 100
pub fn validate_discount_percentage(percentage: u32) -> ValidationResult<()> {
    if !(1..=100).contains(&percentage) {
        return Err(ValidationError::OutOfRange {
            field: "discount percentage".to_string(),
            min: 1,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("Basmati Rice", "name").is_ok());
        assert!(require("", "name").is_err());
        assert!(require("   ", "name").is_err());
    }

    #[test]
    fn test_validate_pincode() {
        // Valid pincodes
        assert!(validate_pincode("110001").is_ok());
        assert!(validate_pincode(" 600042 ").is_ok());

        // Invalid pincodes
        assert!(validate_pincode("").is_err());
        assert!(validate_pincode("011001").is_err());
        assert!(validate_pincode("11001").is_err());
        assert!(validate_pincode("1100011").is_err());
        assert!(validate_pincode("11000a").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ram@example.com").is_ok());
        assert!(validate_email("a.b@shop.co.in").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ram@nodot").is_err());
        assert!(validate_email("two@@example.com").is_err());
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("").is_err());
        assert!(validate_mobile("98765").is_err());
        assert!(validate_mobile("98765432100").is_err());
        assert!(validate_mobile("98765abcde").is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SAVE10").is_ok());
        assert!(validate_coupon_code(" diwali25 ").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("HAS SPACE").is_err());
        assert!(validate_coupon_code(&"A".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_expense_amount() {
        assert!(validate_expense_amount(Money::from_rupees(100)).is_ok());
        assert!(validate_expense_amount(Money::zero()).is_err());
        assert!(validate_expense_amount(Money::from_rupees(-10)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_discount_percentage() {
        assert!(validate_discount_percentage(10).is_ok());
        assert!(validate_discount_percentage(100).is_ok());
        assert!(validate_discount_percentage(0).is_err());
        assert!(validate_discount_percentage(101).is_err());
    }
}
