//! # Store Error Types
//!
//! Error types for entity store mutations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError / ValidationError (hind-core)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds entity context and mutation guards    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer displays user-friendly message                     │
//! │                                                                         │
//! │  Every by-id mutation returns StoreResult: a caller can always         │
//! │  distinguish "not found" from "updated" (no silent no-ops).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use hind_core::{CoreError, Money, OrderStatus, ValidationError};

/// Entity store mutation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - A by-id mutation or lookup targets an id that doesn't exist
    ///
    /// In the original deployment a missing id silently matched nothing;
    /// here it is always a reported failure.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (duplicate email at signup).
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// Product cannot be deleted while an order line references it.
    ///
    /// The one referential-integrity check the store performs before
    /// mutating.
    #[error("Product {product_id} is referenced by order {order_id} and cannot be deleted")]
    ProductReferencedByOrder {
        product_id: String,
        order_id: String,
    },

    /// An order in a terminal state (Delivered, Rejected, Cancelled)
    /// permits no further transitions.
    ///
    /// This guard is also what makes the cancellation refund idempotent:
    /// a second Cancelled transition is rejected before the refund rule
    /// can run again.
    #[error("Order {order_id} is already {status}, no further transitions allowed")]
    OrderAlreadyTerminal {
        order_id: String,
        status: OrderStatus,
    },

    /// The requested status change is not permitted from the order's
    /// current state (e.g. customer cancellation of a non-Pending order,
    /// payment approval of a non-Pending order).
    #[error("Order {order_id} is {status}, cannot {action}")]
    InvalidOrderState {
        order_id: String,
        status: OrderStatus,
        action: &'static str,
    },

    /// Payment approval was requested for a method that does not take
    /// manual approval (Cash on Delivery, Pay from Wallet).
    #[error("Payment method '{method}' does not require manual approval")]
    PaymentNotApprovable { method: String },

    /// Wallet debit would overdraw the balance.
    ///
    /// Only checkout debits are balance-checked; refund credits and admin
    /// adjustments use the unchecked path, which can go negative.
    #[error("Insufficient wallet balance: have {balance}, need {required}")]
    InsufficientWalletFunds { balance: Money, required: Money },

    /// User has no wallet to debit or credit.
    #[error("User {user_id} has no wallet")]
    WalletNotEnabled { user_id: String },

    /// Customer reply on a ticket that is Resolved or Closed.
    #[error("Ticket {ticket_id} is no longer accepting replies")]
    TicketNotAcceptingReplies { ticket_id: String },

    /// Login failed. Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Business rule violation from hind-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure from hind-core.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session persistence failed (the JSON session file could not be
    /// written).
    #[error("Session persistence failed: {0}")]
    SessionPersistence(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field,
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("Order", "00042");
        assert_eq!(err.to_string(), "Order not found: 00042");
    }

    #[test]
    fn test_terminal_order_message() {
        let err = StoreError::OrderAlreadyTerminal {
            order_id: "00042".to_string(),
            status: OrderStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Order 00042 is already Cancelled, no further transitions allowed"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let core = CoreError::CartEmpty;
        let err: StoreError = core.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }
}
