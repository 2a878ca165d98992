//! # hind-core: Pure Business Logic for Hind General Store
//!
//! This crate is the **heart** of the Hind General Store backend. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Hind General Store Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Storefront + Admin Back-office (TypeScript)       │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Order Admin UI   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SharedStore contract                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  hind-store (Entity Store)                      │   │
//! │  │    place_order, update_order_status, update_user_wallet, ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hind-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Coupons  │  │   │
//! │  │   │   Order   │  │  ₹ paise  │  │ Wishlist  │  │  DelivFee │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, Order, Coupon, etc.)
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`cart`] - Cart and wishlist collection semantics
//! - [`pricing`] - Coupon evaluation, discount stacking, delivery fees
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system, network, persistence access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use hind_core::money::Money;
//! use hind_core::pricing::FIRST_ORDER_DISCOUNT;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_rupees(1000);
//!
//! // First-order customers get a flat discount
//! let discounted = subtotal - FIRST_ORDER_DISCOUNT;
//! assert_eq!(discounted, Money::from_rupees(950));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use hind_core::Money` instead of
// `use hind_core::money::Money`

pub use cart::{Cart, Wishlist};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{CheckoutQuote, FIRST_ORDER_DISCOUNT};
pub use types::*;
