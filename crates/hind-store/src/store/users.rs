//! # Accounts & Notifications
//!
//! Signup, login, profile edits, notification preferences, and the
//! notification inbox. Accounts are created at seed time or via signup
//! and are never deleted.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hind_core::new_entity_id;
use hind_core::types::{NotificationPrefs, User, UserRole};
use hind_core::validation::{
    self, validate_email, validate_mobile, validate_pincode,
};
use hind_core::Money;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Short login accepted for the owner account in place of the full email.
/// The one exemption to the unique-email rule: no signup may claim it.
pub const OWNER_LOGIN_ALIAS: &str = "owner";

/// Self-service signup form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mobile: Option<String>,
    pub pincode: Option<String>,
}

/// Self-service profile edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
}

impl Store {
    /// Creates a new retailer account.
    ///
    /// ## Invariant
    /// Email is unique case-insensitively, and may not shadow the owner
    /// login alias. Role is always Retailer; staff accounts exist only in
    /// seed data.
    pub fn sign_up(&mut self, form: SignUpForm) -> StoreResult<User> {
        validation::require(&form.name, "name")?;
        validation::require(&form.password, "password")?;
        validate_email(&form.email)?;
        if let Some(mobile) = &form.mobile {
            validate_mobile(mobile)?;
        }
        if let Some(pincode) = &form.pincode {
            validate_pincode(pincode)?;
        }

        let email = form.email.trim();
        let taken = email.eq_ignore_ascii_case(OWNER_LOGIN_ALIAS)
            || self
                .users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(email));
        if taken {
            return Err(StoreError::duplicate("email", email));
        }

        let user = User {
            id: new_entity_id(),
            name: form.name.trim().to_string(),
            email: email.to_string(),
            password: form.password,
            role: UserRole::Retailer,
            has_credit: false,
            credit_limit: Money::zero(),
            khata_due_date: None,
            has_wallet: false,
            wallet_balance: Money::zero(),
            mobile: form.mobile,
            shop_name: None,
            address: None,
            pincode: form.pincode,
            notification_prefs: NotificationPrefs::default(),
            notifications: Vec::new(),
            back_in_stock_subscriptions: Vec::new(),
        };

        self.users.push(user.clone());
        info!(user_id = %user.id, "New account created");
        Ok(user)
    }

    /// Verifies a login and returns the matched account.
    ///
    /// The login is matched case-insensitively against every account
    /// email; the owner account additionally answers to
    /// [`OWNER_LOGIN_ALIAS`]. Passwords are compared by plain equality.
    pub fn authenticate(&self, login: &str, password: &str) -> StoreResult<&User> {
        let login = login.trim();

        let user = self.users.iter().find(|u| {
            u.email.eq_ignore_ascii_case(login)
                || (u.role == UserRole::Owner && login.eq_ignore_ascii_case(OWNER_LOGIN_ALIAS))
        });

        match user {
            Some(user) if user.password == password => Ok(user),
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    /// Applies a self-service profile edit.
    pub fn update_profile(&mut self, user_id: &str, update: ProfileUpdate) -> StoreResult<()> {
        if let Some(name) = &update.name {
            validation::require(name, "name")?;
        }
        if let Some(mobile) = &update.mobile {
            validate_mobile(mobile)?;
        }
        if let Some(pincode) = &update.pincode {
            validate_pincode(pincode)?;
        }

        let user = self.user_mut(user_id)?;
        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(mobile) = update.mobile {
            user.mobile = Some(mobile);
        }
        if let Some(shop_name) = update.shop_name {
            user.shop_name = Some(shop_name);
        }
        if let Some(address) = update.address {
            user.address = Some(address);
        }
        if let Some(pincode) = update.pincode {
            user.pincode = Some(pincode);
        }

        debug!(user_id, "Profile updated");
        Ok(())
    }

    /// Replaces a user's notification opt-in toggles.
    pub fn set_notification_prefs(
        &mut self,
        user_id: &str,
        prefs: NotificationPrefs,
    ) -> StoreResult<()> {
        let user = self.user_mut(user_id)?;
        user.notification_prefs = prefs;
        Ok(())
    }

    /// Delivers a notification to one user, unconditionally.
    ///
    /// Preference gating belongs to the call sites that have a preference
    /// to honor (order status, back-in-stock); direct admin messages and
    /// wallet receipts always land.
    pub fn notify_user(&mut self, user_id: &str, message: String) -> StoreResult<()> {
        let user = self.user_mut(user_id)?;
        Store::push_notification(user, message);
        Ok(())
    }

    /// Marks every notification in the user's inbox as read.
    pub fn mark_notifications_read(&mut self, user_id: &str) -> StoreResult<()> {
        let user = self.user_mut(user_id)?;
        for notification in &mut user.notifications {
            notification.read = true;
        }
        Ok(())
    }
}
