//! # Back-Office Reports
//!
//! Read-side projections over the entity store. Every figure here is
//! recomputed from the order and expense lists on demand; nothing is
//! cached or incrementally maintained, so there is no stored aggregate
//! to drift out of sync with the source collections.

use chrono::Datelike;
use serde::Serialize;

use hind_core::money::Money;
use hind_core::types::{OrderStatus, Product};

use crate::store::Store;

/// Revenue and expense totals for one calendar month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// Sum of Delivered order totals dated in the month.
    pub revenue: Money,
    /// Number of Delivered orders behind the revenue figure.
    pub delivered_orders: usize,
    pub expenses: Money,
    /// Revenue minus expenses. Can be negative.
    pub net: Money,
}

/// Units moved for one product, across the order history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub units: u64,
}

/// Lifetime spend of one customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSpend {
    pub user_id: String,
    pub name: String,
    pub total: Money,
    pub orders: usize,
}

impl Store {
    /// Profit picture for one calendar month: Delivered revenue minus
    /// recorded expenses, both bucketed by their own date field.
    pub fn monthly_summary(&self, year: i32, month: u32) -> MonthlySummary {
        let in_month = |date: &chrono::DateTime<chrono::Utc>| {
            date.year() == year && date.month() == month
        };

        let delivered: Vec<_> = self
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered && in_month(&o.date))
            .collect();
        let revenue = delivered
            .iter()
            .map(|o| o.total)
            .fold(Money::zero(), |a, b| a + b);

        let expenses = self
            .expenses
            .iter()
            .filter(|e| in_month(&e.date))
            .map(|e| e.amount)
            .fold(Money::zero(), |a, b| a + b);

        MonthlySummary {
            year,
            month,
            revenue,
            delivered_orders: delivered.len(),
            expenses,
            net: revenue - expenses,
        }
    }

    /// The `n` best-selling products by units across all orders that were
    /// not Cancelled or Rejected. Ties break by name for a stable listing.
    pub fn top_products(&self, n: usize) -> Vec<ProductSales> {
        let mut units: Vec<ProductSales> = Vec::new();

        for order in &self.orders {
            if matches!(order.status, OrderStatus::Cancelled | OrderStatus::Rejected) {
                continue;
            }
            for item in &order.items {
                match units.iter_mut().find(|s| s.product_id == item.product_id) {
                    Some(entry) => entry.units += item.quantity as u64,
                    None => units.push(ProductSales {
                        product_id: item.product_id.clone(),
                        name: item.name.clone(),
                        units: item.quantity as u64,
                    }),
                }
            }
        }

        units.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
        units.truncate(n);
        units
    }

    /// The `n` highest-spending customers by Delivered order totals.
    pub fn top_customers(&self, n: usize) -> Vec<CustomerSpend> {
        let mut spend: Vec<CustomerSpend> = Vec::new();

        for order in &self.orders {
            if order.status != OrderStatus::Delivered {
                continue;
            }
            match spend.iter_mut().find(|s| s.user_id == order.user.user_id) {
                Some(entry) => {
                    entry.total += order.total;
                    entry.orders += 1;
                }
                None => spend.push(CustomerSpend {
                    user_id: order.user.user_id.clone(),
                    name: order.user.name.clone(),
                    total: order.total,
                    orders: 1,
                }),
            }
        }

        spend.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        spend.truncate(n);
        spend
    }

    /// Products at or below their reorder point, for the restock list.
    /// Unlisted products are included: hidden stock still needs buying.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use chrono::{TimeZone, Utc};
    use hind_core::types::{
        CartItem, DeliveryMethod, Order, PaymentMethod, UserDetails,
    };

    fn order(
        id: &str,
        user_id: &str,
        name: &str,
        status: OrderStatus,
        total: i64,
        date: chrono::DateTime<chrono::Utc>,
        items: Vec<CartItem>,
    ) -> Order {
        Order {
            id: id.to_string(),
            user: UserDetails {
                user_id: user_id.to_string(),
                name: name.to_string(),
                email: format!("{user_id}@example.com"),
                mobile: None,
                shop_name: None,
                address: String::new(),
                pincode: String::new(),
            },
            items,
            total: Money::from_rupees(total),
            status,
            date,
            delivered_date: None,
            payment_method: PaymentMethod::CashOnDelivery,
            payment_screenshot: None,
            payment_approved: true,
            delivery_method: DeliveryMethod::HomeDelivery,
            delivery_slot: None,
            delivery_review: None,
            internal_notes: Vec::new(),
            discount_applied: Money::zero(),
            coupon_applied: None,
            delivery_fee_applied: Money::zero(),
            customer_notes: None,
        }
    }

    fn item(product_id: &str, name: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            name: name.to_string(),
            unit_price_at_add: Money::from_rupees(10),
            quantity,
            added_at: Utc::now(),
        }
    }

    fn fixed_date(day: u32) -> chrono::DateTime<chrono::Utc> {
        Utc.with_ymd_and_hms(2026, 7, day, 12, 0, 0).unwrap()
    }

    fn report_store() -> Store {
        let mut seed = SeedData::demo();
        seed.orders = vec![
            order(
                "00001",
                "u-asha",
                "Asha Devi",
                OrderStatus::Delivered,
                500,
                fixed_date(3),
                vec![item("p-rice", "Basmati Rice 5kg", 1)],
            ),
            order(
                "00002",
                "u-asha",
                "Asha Devi",
                OrderStatus::Delivered,
                300,
                fixed_date(10),
                vec![item("p-oil", "Fortune Sunflower Oil 1L", 2)],
            ),
            order(
                "00003",
                "u-khata",
                "Ramesh Gupta",
                OrderStatus::Delivered,
                4_100,
                // Previous month: outside the July window.
                Utc.with_ymd_and_hms(2026, 6, 28, 12, 0, 0).unwrap(),
                vec![item("p-atta", "Aashirvaad Atta 10kg", 10)],
            ),
            order(
                "00004",
                "u-vijay",
                "Vijay Singh",
                OrderStatus::Cancelled,
                900,
                fixed_date(15),
                vec![item("p-rice", "Basmati Rice 5kg", 99)],
            ),
        ];
        seed.expenses = vec![hind_core::types::Expense {
            id: "e-1".to_string(),
            date: fixed_date(5),
            description: "Shop rent".to_string(),
            amount: Money::from_rupees(8_000),
            category: hind_core::types::ExpenseCategory::Rent,
        }];
        Store::with_seed(seed)
    }

    #[test]
    fn test_monthly_summary_buckets_by_month() {
        let store = report_store();
        let july = store.monthly_summary(2026, 7);

        // Only the two July Delivered orders count; the Cancelled one and
        // the June one do not.
        assert_eq!(july.revenue, Money::from_rupees(800));
        assert_eq!(july.delivered_orders, 2);
        assert_eq!(july.expenses, Money::from_rupees(8_000));
        assert_eq!(july.net, Money::from_rupees(-7_200));

        let june = store.monthly_summary(2026, 6);
        assert_eq!(june.revenue, Money::from_rupees(4_100));
        assert_eq!(june.expenses, Money::zero());
    }

    #[test]
    fn test_top_products_excludes_dead_orders() {
        let store = report_store();
        let top = store.top_products(2);

        // The cancelled 99-unit rice order is excluded, so atta leads.
        assert_eq!(top[0].product_id, "p-atta");
        assert_eq!(top[0].units, 10);
        assert_eq!(top[1].product_id, "p-oil");
        assert_eq!(top[1].units, 2);
    }

    #[test]
    fn test_top_customers_rank_by_delivered_spend() {
        let store = report_store();
        let top = store.top_customers(3);

        assert_eq!(top[0].user_id, "u-khata");
        assert_eq!(top[0].total, Money::from_rupees(4_100));
        assert_eq!(top[1].user_id, "u-asha");
        assert_eq!(top[1].total, Money::from_rupees(800));
        assert_eq!(top[1].orders, 2);
        // u-vijay only has a cancelled order.
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_low_stock_report() {
        let store = Store::with_seed(SeedData::demo());
        let low: Vec<_> = store.low_stock_products();

        // p-sugar (0) and p-tea (4, reorder point 5).
        assert_eq!(low.len(), 2);
        assert!(low.iter().any(|p| p.id == "p-sugar"));
        assert!(low.iter().any(|p| p.id == "p-tea"));
    }
}
