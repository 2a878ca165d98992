//! # Domain Types
//!
//! Core domain types used throughout Hind General Store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id ("00042")   │       │
//! │  │  role           │   │  price tiers    │   │  status         │       │
//! │  │  wallet/khata   │   │  stock          │   │  payment        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Coupon      │   │     Expense     │   │  SupportTicket  │       │
//! │  │  fixed / pct    │   │  ledger record  │   │  message thread │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Entities created at runtime get a UUID v4 string id. Orders are the one
//! exception: they carry a zero-padded sequential id ("00001", "00002", ...)
//! because the id doubles as the customer-facing order number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Generates a fresh entity id (UUID v4 string).
///
/// Used for every entity created at runtime except orders, which carry a
/// zero-padded sequential id (see [`Order::format_id`]).
pub fn new_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// User
// =============================================================================

/// Role of a store account.
///
/// The role decides which price tier a user sees: wholesalers buy at
/// `wholesale_price`, everyone else at `discount_price` falling back to
/// `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular retail customer (the only role self-signup can create).
    Retailer,
    /// Bulk buyer with access to the wholesale price tier.
    Wholesaler,
    /// Back-office staff.
    Admin,
    /// Store owner (superset of admin).
    Owner,
}

impl UserRole {
    /// Admin and owner accounts can operate the back-office.
    #[inline]
    pub const fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Owner)
    }
}

/// Per-user notification opt-in toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    /// Notify on order status changes.
    pub order_status: bool,
    /// Notify on promotions and coupons.
    pub promotions: bool,
    /// Notify when a subscribed product is back in stock.
    pub back_in_stock: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        NotificationPrefs {
            order_status: true,
            promotions: true,
            back_in_stock: true,
        }
    }
}

/// An in-app notification delivered to one user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub read: bool,
}

/// A store account.
///
/// ## Lifecycle
/// Created at seed time or via signup (role fixed to Retailer); mutated in
/// place by admin actions and self-service profile edits; never deleted.
///
/// ## Invariant
/// Email is unique among users (compared case-insensitively). The single
/// hard-coded owner login alias is exempt from the uniqueness check.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    /// Login identity, matched case-insensitively.
    pub email: String,

    /// Plaintext password, compared by equality. Matches the original
    /// deployment; hashing is an explicit non-goal of this core.
    pub password: String,

    pub role: UserRole,

    // --- Khata (store credit) terms ---
    /// Whether the store extends khata credit to this user.
    pub has_credit: bool,
    /// Credit limit for Pay-on-Khata orders.
    pub credit_limit: Money,
    /// When the outstanding khata balance falls due.
    #[ts(as = "Option<String>")]
    pub khata_due_date: Option<DateTime<Utc>>,

    // --- Wallet ---
    /// Whether this user has a stored-value wallet.
    pub has_wallet: bool,
    /// Current wallet balance. Can go negative (documented ledger gap).
    pub wallet_balance: Money,

    // --- Profile ---
    pub mobile: Option<String>,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,

    pub notification_prefs: NotificationPrefs,

    /// Notifications delivered to this user, newest last.
    pub notifications: Vec<Notification>,

    /// Product ids this user wants a back-in-stock alert for.
    /// One-shot: the entry is removed when the alert fires.
    pub back_in_stock_subscriptions: Vec<String>,
}

impl User {
    /// Resolves the effective unit price of a product for this user.
    ///
    /// ## Invariant (price tiers)
    /// - Wholesaler → `wholesale_price`
    /// - Everyone else → `discount_price` if set, otherwise `price`
    pub fn unit_price(&self, product: &Product) -> Money {
        product.effective_price(self.role)
    }

    /// Snapshot of the fields denormalized onto an order at checkout.
    pub fn details(&self) -> UserDetails {
        UserDetails {
            user_id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
            shop_name: self.shop_name.clone(),
            address: self.address.clone().unwrap_or_default(),
            pincode: self.pincode.clone().unwrap_or_default(),
        }
    }
}

/// Denormalized customer snapshot stored on each order.
///
/// Not a foreign key: later profile edits never rewrite past orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub shop_name: Option<String>,
    pub address: String,
    pub pincode: String,
}

// =============================================================================
// Product
// =============================================================================

/// Promotional label attached to a product (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductTag {
    BestSeller,
    NewArrival,
    Seasonal,
    Deal,
}

/// A customer review on a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub comment: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// A catalog product.
///
/// ## Lifecycle
/// Created/edited/deleted by admin. Stock is only ever changed by explicit
/// admin edits, never by order placement (manual inventory reconciliation).
/// A stock transition from 0 to >0 triggers back-in-stock notifications to
/// subscribed users.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,
    pub description: String,
    pub category: String,

    /// Retail price tier.
    pub price: Money,
    /// Wholesale price tier (seen by wholesaler accounts).
    pub wholesale_price: Money,

    /// Discount percentage is the admin input...
    pub discount_percentage: Option<u32>,
    /// ...and the discounted price is derived from it and stored.
    pub discount_price: Option<Money>,

    /// Units on hand. Never negative.
    pub stock: u32,

    /// Low-stock threshold for the back-office report.
    pub reorder_point: u32,

    /// Per-order quantity cap. `None` = unlimited.
    pub max_order_quantity: Option<u32>,

    /// Visibility flag: unlisted products are hidden from the storefront.
    pub is_listed: bool,

    pub tags: Vec<ProductTag>,
    pub reviews: Vec<Review>,
}

/// Default low-stock threshold for new products.
pub const DEFAULT_REORDER_POINT: u32 = 5;

impl Product {
    /// Effective unit price for a given role.
    pub fn effective_price(&self, role: UserRole) -> Money {
        match role {
            UserRole::Wholesaler => self.wholesale_price,
            _ => self.discount_price.unwrap_or(self.price),
        }
    }

    /// Derives and stores `discount_price` from `discount_percentage`.
    ///
    /// The percentage is the input; the price is the stored derived value.
    /// Clearing the percentage clears the derived price.
    pub fn apply_discount_percentage(&mut self, percentage: Option<u32>) {
        self.discount_percentage = percentage;
        self.discount_price = percentage.map(|p| self.price - self.price.percent_of(p));
    }

    /// True when stock has fallen to or below the reorder point.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_point
    }

    /// Largest quantity a single order may carry for this product.
    pub fn order_quantity_cap(&self) -> u32 {
        match self.max_order_quantity {
            Some(cap) => cap.min(self.stock),
            None => self.stock,
        }
    }
}

// =============================================================================
// Cart Item (order line snapshot)
// =============================================================================

/// A line item: a product snapshot plus quantity.
///
/// Uses the snapshot pattern to freeze the unit price at the moment the
/// item enters the cart, insulating the cart (and any order built from it)
/// from later price changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID (for catalog lookup).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    /// This is critical: we lock in the price when added to cart.
    pub unit_price_at_add: Money,

    /// Quantity in cart. Clamped to min(stock, max_order_quantity).
    pub quantity: u32,

    /// When this item was added to cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart item from a product, freezing the price for `role`.
    pub fn from_product(product: &Product, role: UserRole, quantity: u32) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_at_add: product.effective_price(role),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price_at_add.multiply_quantity(self.quantity as i64)
    }
}

// =============================================================================
// Order
// =============================================================================

/// The status of an order.
///
/// ```text
/// Pending ──► Approved ──► Packed ──► Out for Delivery ──► Delivered
///    │                                                        (terminal)
///    ├──► Rejected  (terminal)
///    └──► Cancelled (terminal)
/// ```
///
/// Terminal states are immutable: the store rejects any transition out of
/// Delivered, Rejected, or Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Approved,
    Packed,
    OutForDelivery,
    Delivered,
    Rejected,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states permit no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Rejected | OrderStatus::Cancelled
        )
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Human-readable status strings, as shown to customers.
impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::Packed => "Packed",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Out-of-band bank/UPI transfer; customer uploads proof, admin approves.
    ManualTransfer,
    /// Paid in cash at the door; approved implicitly at delivery.
    CashOnDelivery,
    /// Charged against the customer's khata credit; admin approves.
    PayOnKhata,
    /// Debited from the customer's stored-value wallet at checkout.
    PayFromWallet,
}

impl PaymentMethod {
    /// Methods whose payment an admin must approve by hand.
    #[inline]
    pub const fn requires_manual_approval(&self) -> bool {
        matches!(self, PaymentMethod::ManualTransfer | PaymentMethod::PayOnKhata)
    }

    /// Methods that can be refunded to the wallet on cancellation.
    ///
    /// Cash on Delivery never took money up front, so there is nothing to
    /// refund.
    #[inline]
    pub const fn is_refundable(&self) -> bool {
        !matches!(self, PaymentMethod::CashOnDelivery)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMethod::ManualTransfer => "Manual Transfer",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::PayOnKhata => "Pay on Khata",
            PaymentMethod::PayFromWallet => "Pay from Wallet",
        };
        f.write_str(s)
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    HomeDelivery,
    StorePickup,
}

/// Customer rating left against a delivered order, with an optional
/// admin response.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReview {
    /// 1 to 5 stars.
    pub rating: u8,
    pub comment: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub admin_response: Option<String>,
}

/// Admin-only audit note on an order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InternalNote {
    pub author: String,
    pub text: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// A customer order.
///
/// ## Lifecycle
/// Created with status Pending by checkout; status advances through admin
/// action until a terminal state (Delivered / Rejected / Cancelled) is
/// reached, after which it is immutable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Zero-padded sequential id, e.g. "00042". Doubles as the
    /// customer-facing order number.
    pub id: String,

    /// Denormalized customer snapshot (not a foreign key).
    pub user: UserDetails,

    pub items: Vec<CartItem>,
    pub total: Money,
    pub status: OrderStatus,

    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub delivered_date: Option<DateTime<Utc>>,

    pub payment_method: PaymentMethod,
    /// Base64-encoded proof image for Manual Transfer payments.
    pub payment_screenshot: Option<String>,
    /// Only meaningful for methods that require manual approval; Cash on
    /// Delivery orders are approved implicitly at delivery.
    pub payment_approved: bool,

    pub delivery_method: DeliveryMethod,
    /// Delivery time slot chosen at checkout, e.g. "10am - 12pm".
    pub delivery_slot: Option<String>,

    pub delivery_review: Option<DeliveryReview>,
    pub internal_notes: Vec<InternalNote>,

    pub discount_applied: Money,
    pub coupon_applied: Option<String>,
    pub delivery_fee_applied: Money,
    pub customer_notes: Option<String>,
}

/// Width of the zero-padded order id.
pub const ORDER_ID_WIDTH: usize = 5;

impl Order {
    /// Numeric value of the zero-padded order id, if it parses.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    /// Formats a sequential order number as a zero-padded id.
    pub fn format_id(seq: u64) -> String {
        format!("{:0width$}", seq, width = ORDER_ID_WIDTH)
    }

    /// Sum of line totals (before discounts and delivery fee).
    pub fn items_subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).fold(Money::zero(), |a, b| a + b)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// Discount shape of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum CouponKind {
    /// Flat amount off the subtotal.
    Fixed(Money),
    /// Percentage of the subtotal.
    Percentage(u32),
}

/// A discount coupon.
///
/// ## Notes
/// - `code` is the match key, compared case-insensitively.
/// - `user_id`, when set, restricts the coupon to one user.
/// - There is no usage counting: a coupon can be reapplied without limit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub kind: CouponKind,
    pub min_order_value: Option<Money>,
    pub is_active: bool,
    pub user_id: Option<String>,
}

impl Coupon {
    /// Whether this coupon can apply for the given user.
    pub fn applies_to(&self, user_id: &str) -> bool {
        self.is_active && self.user_id.as_deref().map_or(true, |u| u == user_id)
    }

    /// Case-insensitive code match.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Expense ledger category (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Inventory,
    Rent,
    Utilities,
    Salaries,
    Transport,
    Marketing,
    Other,
}

/// A ledger record of money the store spent.
///
/// Pure record, admin CRUD only; feeds the monthly revenue-minus-expense
/// report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub description: String,
    /// Always strictly positive.
    pub amount: Money,
    pub category: ExpenseCategory,
}

// =============================================================================
// Support Ticket
// =============================================================================

/// Status of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Customers may only reply while the ticket is still being worked.
    #[inline]
    pub const fn accepts_user_reply(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

/// Who authored a support message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MessageAuthor {
    User,
    Admin,
}

/// One message in a ticket thread.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessage {
    pub author: MessageAuthor,
    pub text: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// A customer support ticket with its ordered message thread.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub subject: String,
    pub status: TicketStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    pub messages: Vec<SupportMessage>,
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Which postal codes the store will ship to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingScope {
    /// Deliver only to the serviceable-pincode allow-list.
    Local,
    /// Deliver anywhere in the country.
    Nationwide,
}

/// Delivery fee schedule.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFees {
    /// Fee for deliveries inside the serviceable-pincode area.
    pub local: Money,
    /// Fee for nationwide deliveries.
    pub nationwide: Money,
    /// Orders at or above this subtotal ship free.
    pub free_delivery_threshold: Money,
}

/// Store identity shown on the storefront and receipts.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Bank/UPI details shown to Manual Transfer customers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub upi_id: String,
    pub bank_account: String,
    pub ifsc: String,
    pub account_holder: String,
}

/// Store-wide configuration, edited from the back-office.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub store_info: StoreInfo,
    pub payment_details: PaymentDetails,
    /// Postal codes the store delivers to under Local shipping scope.
    pub serviceable_pincodes: Vec<String>,
    pub categories: Vec<String>,
    pub delivery_fees: DeliveryFees,
    pub shipping_scope: ShippingScope,
}

impl StoreConfig {
    /// Whether a pincode is serviceable under the current scope.
    pub fn is_serviceable(&self, pincode: &str) -> bool {
        match self.shipping_scope {
            ShippingScope::Nationwide => true,
            ShippingScope::Local => {
                self.serviceable_pincodes.iter().any(|p| p == pincode)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_prices(price: i64, wholesale: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Basmati Rice 5kg".to_string(),
            description: String::new(),
            category: "Grocery".to_string(),
            price: Money::from_rupees(price),
            wholesale_price: Money::from_rupees(wholesale),
            discount_percentage: None,
            discount_price: None,
            stock: 10,
            reorder_point: DEFAULT_REORDER_POINT,
            max_order_quantity: None,
            is_listed: true,
            tags: vec![],
            reviews: vec![],
        }
    }

    #[test]
    fn test_effective_price_tiers() {
        let mut product = product_with_prices(500, 450);

        assert_eq!(
            product.effective_price(UserRole::Retailer),
            Money::from_rupees(500)
        );
        assert_eq!(
            product.effective_price(UserRole::Wholesaler),
            Money::from_rupees(450)
        );

        // Discount price overrides retail, never wholesale
        product.apply_discount_percentage(Some(10));
        assert_eq!(
            product.effective_price(UserRole::Retailer),
            Money::from_rupees(450)
        );
        assert_eq!(
            product.effective_price(UserRole::Wholesaler),
            Money::from_rupees(450)
        );
    }

    #[test]
    fn test_discount_percentage_derives_price() {
        let mut product = product_with_prices(200, 180);

        product.apply_discount_percentage(Some(25));
        assert_eq!(product.discount_price, Some(Money::from_rupees(150)));

        product.apply_discount_percentage(None);
        assert_eq!(product.discount_price, None);
        assert_eq!(product.discount_percentage, None);
    }

    #[test]
    fn test_order_quantity_cap() {
        let mut product = product_with_prices(100, 90);
        product.stock = 8;

        assert_eq!(product.order_quantity_cap(), 8);

        product.max_order_quantity = Some(3);
        assert_eq!(product.order_quantity_cap(), 3);

        product.stock = 2;
        assert_eq!(product.order_quantity_cap(), 2);
    }

    #[test]
    fn test_order_status_terminality() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "Out for Delivery");
        assert_eq!(OrderStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn test_payment_method_flags() {
        assert!(PaymentMethod::ManualTransfer.requires_manual_approval());
        assert!(PaymentMethod::PayOnKhata.requires_manual_approval());
        assert!(!PaymentMethod::CashOnDelivery.requires_manual_approval());
        assert!(!PaymentMethod::PayFromWallet.requires_manual_approval());

        assert!(!PaymentMethod::CashOnDelivery.is_refundable());
        assert!(PaymentMethod::PayFromWallet.is_refundable());
    }

    #[test]
    fn test_order_id_formatting() {
        assert_eq!(Order::format_id(1), "00001");
        assert_eq!(Order::format_id(42), "00042");
        assert_eq!(Order::format_id(123456), "123456"); // width grows past 5 digits
    }

    #[test]
    fn test_coupon_matching() {
        let coupon = Coupon {
            id: "c1".to_string(),
            code: "SAVE10".to_string(),
            kind: CouponKind::Percentage(10),
            min_order_value: None,
            is_active: true,
            user_id: Some("u1".to_string()),
        };

        assert!(coupon.matches_code("save10"));
        assert!(coupon.matches_code(" SAVE10 "));
        assert!(!coupon.matches_code("save20"));

        assert!(coupon.applies_to("u1"));
        assert!(!coupon.applies_to("u2"));
    }

    #[test]
    fn test_ticket_reply_gating() {
        assert!(TicketStatus::Open.accepts_user_reply());
        assert!(TicketStatus::InProgress.accepts_user_reply());
        assert!(!TicketStatus::Resolved.accepts_user_reply());
        assert!(!TicketStatus::Closed.accepts_user_reply());
    }

    #[test]
    fn test_new_entity_ids_are_unique() {
        let a = new_entity_id();
        let b = new_entity_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_order_status_wire_format() {
        // The frontend matches on these snake_case wire names
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");

        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::OutForDelivery);
    }

    #[test]
    fn test_serviceable_pincode() {
        let config = StoreConfig {
            store_info: StoreInfo {
                name: "Hind General Store".to_string(),
                address: String::new(),
                phone: String::new(),
                email: String::new(),
            },
            payment_details: PaymentDetails {
                upi_id: String::new(),
                bank_account: String::new(),
                ifsc: String::new(),
                account_holder: String::new(),
            },
            serviceable_pincodes: vec!["110001".to_string()],
            categories: vec![],
            delivery_fees: DeliveryFees {
                local: Money::from_rupees(30),
                nationwide: Money::from_rupees(80),
                free_delivery_threshold: Money::from_rupees(500),
            },
            shipping_scope: ShippingScope::Local,
        };

        assert!(config.is_serviceable("110001"));
        assert!(!config.is_serviceable("400001"));

        let mut nationwide = config.clone();
        nationwide.shipping_scope = ShippingScope::Nationwide;
        assert!(nationwide.is_serviceable("400001"));
    }
}
