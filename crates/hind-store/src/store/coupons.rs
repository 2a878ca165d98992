//! # Coupon Management
//!
//! Admin lifecycle of coupon codes. Evaluation against a cart lives in
//! `hind_core::pricing`; this module only creates, edits, and retires the
//! codes that evaluation reads.

use tracing::{debug, info};

use hind_core::new_entity_id;
use hind_core::types::{Coupon, CouponKind};
use hind_core::validation::validate_coupon_code;
use hind_core::Money;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Creates a coupon. Codes are unique case-insensitively and stored
    /// uppercased; new coupons start active.
    pub fn add_coupon(
        &mut self,
        code: &str,
        kind: CouponKind,
        min_order_value: Option<Money>,
        user_id: Option<String>,
    ) -> StoreResult<Coupon> {
        validate_coupon_code(code)?;

        let code = code.trim().to_uppercase();
        if self.coupons.iter().any(|c| c.code.eq_ignore_ascii_case(&code)) {
            return Err(StoreError::duplicate("coupon code", code));
        }
        if let Some(user_id) = &user_id {
            self.user(user_id)?;
        }

        let coupon = Coupon {
            id: new_entity_id(),
            code,
            kind,
            min_order_value,
            is_active: true,
            user_id,
        };
        self.coupons.push(coupon.clone());

        info!(coupon = %coupon.code, "Coupon created");
        Ok(coupon)
    }

    /// Full replace-by-id edit of a coupon.
    pub fn update_coupon(&mut self, edited: Coupon) -> StoreResult<()> {
        validate_coupon_code(&edited.code)?;

        let stored = self
            .coupons
            .iter_mut()
            .find(|c| c.id == edited.id)
            .ok_or_else(|| StoreError::not_found("Coupon", &edited.id))?;

        *stored = Coupon {
            code: edited.code.trim().to_uppercase(),
            ..edited
        };
        Ok(())
    }

    /// Deletes a coupon. Orders that already recorded the code keep it;
    /// the snapshot on the order is historical, not a reference.
    pub fn delete_coupon(&mut self, coupon_id: &str) -> StoreResult<()> {
        let before = self.coupons.len();
        self.coupons.retain(|c| c.id != coupon_id);
        if self.coupons.len() == before {
            return Err(StoreError::not_found("Coupon", coupon_id));
        }
        debug!(coupon_id, "Coupon deleted");
        Ok(())
    }

    /// Activates or retires a coupon without deleting it.
    pub fn set_coupon_active(&mut self, coupon_id: &str, active: bool) -> StoreResult<()> {
        let coupon = self
            .coupons
            .iter_mut()
            .find(|c| c.id == coupon_id)
            .ok_or_else(|| StoreError::not_found("Coupon", coupon_id))?;
        coupon.is_active = active;
        Ok(())
    }

    /// Sends a promotional announcement to every user who opted in to
    /// promotion notifications. Returns the number of users reached.
    pub fn broadcast_promotion(&mut self, message: &str) -> usize {
        let mut reached = 0usize;
        for user in &mut self.users {
            if user.notification_prefs.promotions {
                Store::push_notification(user, message.to_string());
                reached += 1;
            }
        }
        info!(reached, "Promotion broadcast");
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use hind_core::pricing::evaluate_coupon;

    fn store() -> Store {
        Store::with_seed(SeedData::demo())
    }

    #[test]
    fn test_add_coupon_uppercases_and_activates() {
        let mut store = store();
        let coupon = store
            .add_coupon(
                "monsoon15",
                CouponKind::Percentage(15),
                Some(Money::from_rupees(500)),
                None,
            )
            .unwrap();

        assert_eq!(coupon.code, "MONSOON15");
        assert!(coupon.is_active);
        assert!(evaluate_coupon(store.coupons(), "Monsoon15", "u-asha").is_some());
    }

    #[test]
    fn test_duplicate_code_rejected_case_insensitive() {
        let mut store = store();
        let err = store
            .add_coupon("save10", CouponKind::Fixed(Money::from_rupees(10)), None, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn test_user_restricted_coupon_requires_known_user() {
        let mut store = store();
        let err = store
            .add_coupon(
                "GHOST5",
                CouponKind::Fixed(Money::from_rupees(5)),
                None,
                Some("nobody".to_string()),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "User", .. }));
    }

    #[test]
    fn test_retire_and_delete() {
        let mut store = store();
        let id = store
            .coupons()
            .iter()
            .find(|c| c.code == "SAVE10")
            .unwrap()
            .id
            .clone();

        store.set_coupon_active(&id, false).unwrap();
        assert!(evaluate_coupon(store.coupons(), "SAVE10", "u-asha").is_none());

        store.delete_coupon(&id).unwrap();
        assert!(matches!(
            store.delete_coupon(&id),
            Err(StoreError::NotFound { entity: "Coupon", .. })
        ));
    }

    #[test]
    fn test_update_coupon_replaces_by_id() {
        let mut store = store();
        let mut edited = store
            .coupons()
            .iter()
            .find(|c| c.code == "WELCOME50")
            .unwrap()
            .clone();
        edited.min_order_value = Some(Money::from_rupees(400));

        store.update_coupon(edited).unwrap();

        let stored = store
            .coupons()
            .iter()
            .find(|c| c.code == "WELCOME50")
            .unwrap();
        assert_eq!(stored.min_order_value, Some(Money::from_rupees(400)));
    }

    #[test]
    fn test_broadcast_respects_promotions_pref() {
        let mut store = store();
        let total_users = store.users().len();

        // Opt one user out.
        store
            .user_mut("u-asha")
            .unwrap()
            .notification_prefs
            .promotions = false;

        let reached = store.broadcast_promotion("Flat 15% off staples this week!");
        assert_eq!(reached, total_users - 1);

        let asha = store.user("u-asha").unwrap();
        assert!(!asha
            .notifications
            .iter()
            .any(|n| n.message.contains("15% off")));
    }
}
