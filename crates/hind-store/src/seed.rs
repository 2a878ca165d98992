//! # Seed Data
//!
//! Static demo fixtures, the stand-in for what would be a database in a
//! real deployment. Loaded once at startup via [`Store::with_seed`] and
//! mutated only through the Mutation API from then on.
//!
//! [`Store::with_seed`]: crate::store::Store::with_seed

use chrono::{Duration, Utc};

use hind_core::money::Money;
use hind_core::types::{
    CartItem, Coupon, CouponKind, DeliveryFees, DeliveryMethod, Expense, ExpenseCategory,
    MessageAuthor, NotificationPrefs, Order, OrderStatus, PaymentDetails, PaymentMethod, Product,
    ProductTag, ShippingScope, StoreConfig, StoreInfo, SupportMessage, SupportTicket,
    TicketStatus, User, UserRole, DEFAULT_REORDER_POINT,
};

/// Everything a freshly-started store contains.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub coupons: Vec<Coupon>,
    pub expenses: Vec<Expense>,
    pub tickets: Vec<SupportTicket>,
    pub config: StoreConfig,
}

impl SeedData {
    /// The demo dataset: a small neighbourhood store with a few regulars.
    pub fn demo() -> Self {
        let now = Utc::now();

        SeedData {
            users: demo_users(),
            products: demo_products(),
            orders: demo_orders(now),
            coupons: demo_coupons(),
            expenses: demo_expenses(now),
            tickets: demo_tickets(now),
            config: demo_config(),
        }
    }
}

fn blank_user(id: &str, name: &str, email: &str, password: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
        has_credit: false,
        credit_limit: Money::zero(),
        khata_due_date: None,
        has_wallet: false,
        wallet_balance: Money::zero(),
        mobile: None,
        shop_name: None,
        address: None,
        pincode: None,
        notification_prefs: NotificationPrefs::default(),
        notifications: Vec::new(),
        back_in_stock_subscriptions: Vec::new(),
    }
}

fn demo_users() -> Vec<User> {
    let owner = User {
        mobile: Some("9810012345".to_string()),
        ..blank_user(
            "u-owner",
            "Hindesh Kumar",
            "owner@hindstore.in",
            "owner123",
            UserRole::Owner,
        )
    };

    let admin = blank_user(
        "u-admin",
        "Sunita Sharma",
        "admin@hindstore.in",
        "admin123",
        UserRole::Admin,
    );

    // Wholesaler buying on khata; no wallet.
    let wholesaler = User {
        has_credit: true,
        credit_limit: Money::from_rupees(50_000),
        khata_due_date: Some(Utc::now() + Duration::days(30)),
        shop_name: Some("Ramesh Traders".to_string()),
        mobile: Some("9811122334".to_string()),
        address: Some("14 Sadar Bazaar".to_string()),
        pincode: Some("110001".to_string()),
        ..blank_user(
            "u-khata",
            "Ramesh Gupta",
            "ramesh@traders.in",
            "ramesh123",
            UserRole::Wholesaler,
        )
    };

    let asha = User {
        has_wallet: true,
        wallet_balance: Money::from_rupees(1_500),
        mobile: Some("9898989898".to_string()),
        address: Some("B-12 Gandhi Nagar".to_string()),
        pincode: Some("110001".to_string()),
        back_in_stock_subscriptions: vec!["p-sugar".to_string()],
        ..blank_user(
            "u-asha",
            "Asha Devi",
            "asha@example.com",
            "asha123",
            UserRole::Retailer,
        )
    };

    // Opted out of order-status notifications.
    let vijay = User {
        has_wallet: true,
        wallet_balance: Money::from_rupees(200),
        pincode: Some("110002".to_string()),
        notification_prefs: NotificationPrefs {
            order_status: false,
            ..NotificationPrefs::default()
        },
        back_in_stock_subscriptions: vec!["p-sugar".to_string()],
        ..blank_user(
            "u-vijay",
            "Vijay Singh",
            "vijay@example.com",
            "vijay123",
            UserRole::Retailer,
        )
    };

    vec![owner, admin, wholesaler, asha, vijay]
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    price: i64,
    wholesale: i64,
    stock: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
        price: Money::from_rupees(price),
        wholesale_price: Money::from_rupees(wholesale),
        discount_percentage: None,
        discount_price: None,
        stock,
        reorder_point: DEFAULT_REORDER_POINT,
        max_order_quantity: None,
        is_listed: true,
        tags: Vec::new(),
        reviews: Vec::new(),
    }
}

fn demo_products() -> Vec<Product> {
    let mut rice = product("p-rice", "Basmati Rice 5kg", "Staples", 500, 450, 40);
    rice.description = "Long-grain aged basmati.".to_string();
    rice.tags = vec![ProductTag::BestSeller];

    let mut atta = product("p-atta", "Aashirvaad Atta 10kg", "Staples", 450, 410, 25);
    atta.apply_discount_percentage(Some(10));

    let mut oil = product("p-oil", "Fortune Sunflower Oil 1L", "Grocery", 150, 135, 60);
    oil.max_order_quantity = Some(10);

    // Out of stock; two seed users are subscribed for the comeback.
    let sugar = product("p-sugar", "Sugar 1kg", "Staples", 45, 40, 0);

    // Sitting below its reorder point.
    let mut tea = product("p-tea", "Tata Tea Gold 500g", "Beverages", 280, 255, 4);
    tea.tags = vec![ProductTag::Deal];

    vec![rice, atta, oil, sugar, tea]
}

fn line(product_id: &str, name: &str, unit_price: i64, quantity: u32) -> CartItem {
    CartItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        unit_price_at_add: Money::from_rupees(unit_price),
        quantity,
        added_at: Utc::now(),
    }
}

fn demo_orders(now: chrono::DateTime<Utc>) -> Vec<Order> {
    let asha = demo_users().into_iter().find(|u| u.id == "u-asha").unwrap();
    let ramesh = demo_users().into_iter().find(|u| u.id == "u-khata").unwrap();

    let delivered = Order {
        id: "00001".to_string(),
        user: asha.details(),
        items: vec![line("p-rice", "Basmati Rice 5kg", 500, 1)],
        total: Money::from_rupees(500),
        status: OrderStatus::Delivered,
        date: now - Duration::days(20),
        delivered_date: Some(now - Duration::days(18)),
        payment_method: PaymentMethod::CashOnDelivery,
        payment_screenshot: None,
        payment_approved: true,
        delivery_method: DeliveryMethod::HomeDelivery,
        delivery_slot: Some("10am - 12pm".to_string()),
        delivery_review: None,
        internal_notes: Vec::new(),
        discount_applied: Money::zero(),
        coupon_applied: None,
        delivery_fee_applied: Money::zero(),
        customer_notes: None,
    };

    // Open khata order: counts toward Ramesh's balance due.
    let khata = Order {
        id: "00002".to_string(),
        user: ramesh.details(),
        items: vec![line("p-atta", "Aashirvaad Atta 10kg", 410, 10)],
        total: Money::from_rupees(4_100),
        status: OrderStatus::Approved,
        date: now - Duration::days(5),
        delivered_date: None,
        payment_method: PaymentMethod::PayOnKhata,
        payment_screenshot: None,
        payment_approved: true,
        delivery_method: DeliveryMethod::HomeDelivery,
        delivery_slot: None,
        delivery_review: None,
        internal_notes: Vec::new(),
        discount_applied: Money::zero(),
        coupon_applied: None,
        delivery_fee_applied: Money::zero(),
        customer_notes: Some("Leave at the back entrance.".to_string()),
    };

    let pending = Order {
        id: "00003".to_string(),
        user: asha.details(),
        items: vec![line("p-oil", "Fortune Sunflower Oil 1L", 150, 2)],
        total: Money::from_rupees(330),
        status: OrderStatus::Pending,
        date: now - Duration::days(1),
        delivered_date: None,
        payment_method: PaymentMethod::ManualTransfer,
        payment_screenshot: None,
        payment_approved: false,
        delivery_method: DeliveryMethod::HomeDelivery,
        delivery_slot: Some("4pm - 6pm".to_string()),
        delivery_review: None,
        internal_notes: Vec::new(),
        discount_applied: Money::zero(),
        coupon_applied: None,
        delivery_fee_applied: Money::from_rupees(30),
        customer_notes: None,
    };

    vec![delivered, khata, pending]
}

fn demo_coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            id: "c-welcome".to_string(),
            code: "WELCOME50".to_string(),
            kind: CouponKind::Fixed(Money::from_rupees(50)),
            min_order_value: Some(Money::from_rupees(300)),
            is_active: true,
            user_id: None,
        },
        Coupon {
            id: "c-save10".to_string(),
            code: "SAVE10".to_string(),
            kind: CouponKind::Percentage(10),
            min_order_value: None,
            is_active: true,
            user_id: None,
        },
        // Personal coupon for one regular.
        Coupon {
            id: "c-asha20".to_string(),
            code: "ASHA20".to_string(),
            kind: CouponKind::Percentage(20),
            min_order_value: None,
            is_active: true,
            user_id: Some("u-asha".to_string()),
        },
        Coupon {
            id: "c-oldcode".to_string(),
            code: "OLDCODE".to_string(),
            kind: CouponKind::Fixed(Money::from_rupees(100)),
            min_order_value: None,
            is_active: false,
            user_id: None,
        },
    ]
}

fn demo_expenses(now: chrono::DateTime<Utc>) -> Vec<Expense> {
    vec![
        Expense {
            id: "e-rent".to_string(),
            date: now - Duration::days(10),
            description: "Shop rent".to_string(),
            amount: Money::from_rupees(8_000),
            category: ExpenseCategory::Rent,
        },
        Expense {
            id: "e-transport".to_string(),
            date: now - Duration::days(3),
            description: "Mandi pickup tempo".to_string(),
            amount: Money::from_rupees(1_200),
            category: ExpenseCategory::Transport,
        },
    ]
}

fn demo_tickets(now: chrono::DateTime<Utc>) -> Vec<SupportTicket> {
    vec![SupportTicket {
        id: "t-oil-seal".to_string(),
        user_id: "u-asha".to_string(),
        user_name: "Asha Devi".to_string(),
        subject: "Broken seal on oil bottle".to_string(),
        status: TicketStatus::Open,
        created_at: now - Duration::days(2),
        updated_at: now - Duration::days(2),
        messages: vec![SupportMessage {
            author: MessageAuthor::User,
            text: "One of the oil bottles arrived with a broken seal.".to_string(),
            date: now - Duration::days(2),
        }],
    }]
}

fn demo_config() -> StoreConfig {
    StoreConfig {
        store_info: StoreInfo {
            name: "Hind General Store".to_string(),
            address: "22 Main Market Road, Delhi".to_string(),
            phone: "011-23456789".to_string(),
            email: "contact@hindstore.in".to_string(),
        },
        payment_details: PaymentDetails {
            upi_id: "hindstore@upi".to_string(),
            bank_account: "001234567890".to_string(),
            ifsc: "SBIN0000456".to_string(),
            account_holder: "Hind General Store".to_string(),
        },
        serviceable_pincodes: vec![
            "110001".to_string(),
            "110002".to_string(),
            "110003".to_string(),
        ],
        categories: vec![
            "Staples".to_string(),
            "Grocery".to_string(),
            "Beverages".to_string(),
            "Household".to_string(),
        ],
        delivery_fees: DeliveryFees {
            local: Money::from_rupees(30),
            nationwide: Money::from_rupees(80),
            free_delivery_threshold: Money::from_rupees(500),
        },
        shipping_scope: ShippingScope::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn test_demo_seed_is_internally_consistent() {
        let seed = SeedData::demo();
        let store = Store::with_seed(seed);

        // Every seed order belongs to a seed user.
        for order in store.orders() {
            assert!(store.user(&order.user.user_id).is_ok(), "order {}", order.id);
        }
        // Every seed order line references a seed product.
        for order in store.orders() {
            for item in &order.items {
                assert!(store.product(&item.product_id).is_ok());
            }
        }
        // Back-in-stock subscriptions point at real products.
        for user in store.users() {
            for product_id in &user.back_in_stock_subscriptions {
                assert!(store.product(product_id).is_ok());
            }
        }
        // Personal coupons point at real users.
        for coupon in store.coupons() {
            if let Some(user_id) = &coupon.user_id {
                assert!(store.user(user_id).is_ok());
            }
        }
    }

    #[test]
    fn test_demo_seed_totals_match_items() {
        let seed = SeedData::demo();
        for order in &seed.orders {
            assert_eq!(
                order.total,
                (order.items_subtotal() - order.discount_applied) + order.delivery_fee_applied,
                "order {}",
                order.id
            );
        }
    }

    #[test]
    fn test_demo_seed_has_an_out_of_stock_comeback_candidate() {
        let seed = SeedData::demo();
        let sugar = seed.products.iter().find(|p| p.id == "p-sugar").unwrap();
        assert_eq!(sugar.stock, 0);

        let subscribers = seed
            .users
            .iter()
            .filter(|u| u.back_in_stock_subscriptions.contains(&sugar.id))
            .count();
        assert_eq!(subscribers, 2);
    }
}
