//! # Wallet & Khata Ledger
//!
//! The wallet is a plain signed balance on the user record, not an
//! append-only ledger. Every adjustment goes through
//! [`Store::update_user_wallet`] so the notification always carries the
//! amount, the reason, and the resulting balance.
//!
//! Khata (store credit) terms live on the user; the outstanding balance
//! is never stored. [`Store::khata_balance_due`] derives it on demand as
//! the sum of the user's non-terminal Pay-on-Khata orders, so there is no
//! cached figure to drift out of sync.

use tracing::{debug, info};

use hind_core::money::Money;
use hind_core::types::PaymentMethod;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Adjusts a user's wallet balance by a signed amount.
    ///
    /// ## Behavior
    /// - `new_balance = balance + amount`; pass a negative amount to debit
    /// - No floor at zero: callers that must not overdraw (wallet checkout)
    ///   validate sufficiency before calling this
    /// - The user is always notified with the amount, reason, and the
    ///   resulting balance
    pub fn update_user_wallet(
        &mut self,
        user_id: &str,
        amount: Money,
        reason: &str,
    ) -> StoreResult<Money> {
        let user = self.user_mut(user_id)?;

        user.wallet_balance += amount;
        let balance = user.wallet_balance;

        let verb = if amount.is_negative() {
            "debited from"
        } else {
            "credited to"
        };
        Store::push_notification(
            user,
            format!(
                "{} {} your wallet ({}). New balance: {}",
                amount.abs(),
                verb,
                reason,
                balance
            ),
        );

        info!(user_id, %amount, %balance, reason, "Wallet adjusted");
        Ok(balance)
    }

    /// Debits a wallet with overdraft protection.
    ///
    /// The checkout path uses this instead of the raw ledger op: the user
    /// must have an enabled wallet and a sufficient balance, otherwise
    /// nothing is written.
    pub fn debit_wallet_checked(
        &mut self,
        user_id: &str,
        amount: Money,
        reason: &str,
    ) -> StoreResult<Money> {
        let user = self.user(user_id)?;

        if !user.has_wallet {
            return Err(StoreError::WalletNotEnabled {
                user_id: user.id.clone(),
            });
        }
        if user.wallet_balance < amount {
            return Err(StoreError::InsufficientWalletFunds {
                balance: user.wallet_balance,
                required: amount,
            });
        }

        self.update_user_wallet(user_id, Money::zero() - amount, reason)
    }

    /// Admin edit of a user's khata (store credit) terms.
    pub fn update_user_khata(
        &mut self,
        user_id: &str,
        has_credit: bool,
        credit_limit: Money,
        khata_due_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> StoreResult<()> {
        let user = self.user_mut(user_id)?;

        user.has_credit = has_credit;
        user.credit_limit = credit_limit;
        user.khata_due_date = khata_due_date;

        debug!(user_id, has_credit, %credit_limit, "Khata terms updated");
        Ok(())
    }

    /// Enables or disables a user's wallet. Disabling keeps the recorded
    /// balance untouched.
    pub fn set_user_wallet_enabled(&mut self, user_id: &str, enabled: bool) -> StoreResult<()> {
        let user = self.user_mut(user_id)?;
        user.has_wallet = enabled;
        debug!(user_id, enabled, "Wallet toggled");
        Ok(())
    }

    /// Outstanding khata balance: the sum of this user's non-terminal
    /// Pay-on-Khata orders. Derived on every call, never stored.
    ///
    /// Cancelled and Rejected orders owe nothing; Delivered orders are
    /// treated as settled.
    pub fn khata_balance_due(&self, user_id: &str) -> StoreResult<Money> {
        // Validate the id so a typo reads as an error, not a zero balance.
        let user = self.user(user_id)?;

        let due = self
            .orders
            .iter()
            .filter(|o| {
                o.user.user_id == user.id
                    && o.payment_method == PaymentMethod::PayOnKhata
                    && !o.status.is_terminal()
            })
            .map(|o| o.total)
            .fold(Money::zero(), |a, b| a + b);

        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use hind_core::types::OrderStatus;

    fn store() -> Store {
        Store::with_seed(SeedData::demo())
    }

    #[test]
    fn test_credit_and_debit_adjust_balance() {
        let mut store = store();
        let start = store.user("u-asha").unwrap().wallet_balance;

        let after = store
            .update_user_wallet("u-asha", Money::from_rupees(100), "Diwali bonus")
            .unwrap();
        assert_eq!(after, start + Money::from_rupees(100));

        let after = store
            .update_user_wallet("u-asha", Money::from_rupees(-40), "Adjustment")
            .unwrap();
        assert_eq!(after, start + Money::from_rupees(60));
    }

    #[test]
    fn test_debit_can_overdraw() {
        let mut store = store();
        // u-vijay holds ₹200; the ledger op itself does not floor at zero
        let after = store
            .update_user_wallet("u-vijay", Money::from_rupees(-500), "Manual correction")
            .unwrap();
        assert_eq!(after, Money::from_rupees(-300));
    }

    #[test]
    fn test_checked_debit_enforces_balance_and_wallet() {
        let mut store = store();

        let after = store
            .debit_wallet_checked("u-asha", Money::from_rupees(100), "Test debit")
            .unwrap();
        assert_eq!(after, Money::from_rupees(1_400));

        assert!(matches!(
            store.debit_wallet_checked("u-vijay", Money::from_rupees(500), "Too much"),
            Err(StoreError::InsufficientWalletFunds { .. })
        ));
        assert!(matches!(
            store.debit_wallet_checked("u-khata", Money::from_rupees(1), "No wallet"),
            Err(StoreError::WalletNotEnabled { .. })
        ));
    }

    #[test]
    fn test_wallet_adjustment_notifies_with_balance() {
        let mut store = store();
        store
            .update_user_wallet("u-asha", Money::from_rupees(25), "Referral reward")
            .unwrap();

        let user = store.user("u-asha").unwrap();
        let last = user.notifications.last().unwrap();
        assert!(last.message.contains("₹25.00"));
        assert!(last.message.contains("Referral reward"));
        assert!(last.message.contains("New balance"));
    }

    #[test]
    fn test_unknown_user_rejected() {
        let mut store = store();
        assert!(matches!(
            store.update_user_wallet("nobody", Money::from_rupees(10), "x"),
            Err(StoreError::NotFound { entity: "User", .. })
        ));
        assert!(matches!(
            store.khata_balance_due("nobody"),
            Err(StoreError::NotFound { entity: "User", .. })
        ));
    }

    #[test]
    fn test_khata_terms_update() {
        let mut store = store();
        store
            .update_user_khata("u-asha", true, Money::from_rupees(10_000), None)
            .unwrap();

        let user = store.user("u-asha").unwrap();
        assert!(user.has_credit);
        assert_eq!(user.credit_limit, Money::from_rupees(10_000));
    }

    #[test]
    fn test_khata_balance_is_derived_from_open_orders() {
        let mut store = store();
        // Seed: order 00002 is u-khata's open Pay-on-Khata order for ₹4100.
        assert_eq!(
            store.khata_balance_due("u-khata").unwrap(),
            Money::from_rupees(4_100)
        );

        // Delivering the order settles it.
        store
            .update_order_status("00002", OrderStatus::Delivered)
            .unwrap();
        assert_eq!(store.khata_balance_due("u-khata").unwrap(), Money::zero());
    }

    #[test]
    fn test_khata_balance_ignores_other_payment_methods() {
        let mut store = store();
        // u-asha's open orders are not Pay on Khata.
        assert_eq!(store.khata_balance_due("u-asha").unwrap(), Money::zero());
    }

    #[test]
    fn test_wallet_toggle() {
        let mut store = store();
        store.set_user_wallet_enabled("u-khata", true).unwrap();
        assert!(store.user("u-khata").unwrap().has_wallet);

        store.set_user_wallet_enabled("u-khata", false).unwrap();
        let user = store.user("u-khata").unwrap();
        assert!(!user.has_wallet);
    }
}
