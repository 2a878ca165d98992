//! # Session State
//!
//! Per-visitor transient state: who is logged in, the confirmed delivery
//! pincode, the cart, the wishlist, and two one-shot UI flags.
//!
//! ## Persistence Boundary
//! Only a handful of keys survive a restart, mirrored to a JSON file at a
//! caller-chosen path:
//!
//! | Key                    | Durable |
//! |------------------------|---------|
//! | cart items             | yes     |
//! | logged-in user id      | yes     |
//! | confirmed pincode      | yes     |
//! | tutorial_seen          | yes     |
//! | notification_prompted  | yes     |
//! | wishlist               | no      |
//!
//! A missing or unreadable file is not an error: the session starts
//! fresh, exactly as a reload discards everything that was not persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hind_core::types::CartItem;
use hind_core::validation::validate_pincode;
use hind_core::{Cart, Wishlist};

use crate::error::{StoreError, StoreResult};

/// One visitor's session.
#[derive(Debug, Default)]
pub struct Session {
    /// Id of the logged-in user, if any.
    pub user_id: Option<String>,
    /// Last confirmed delivery pincode.
    pub pincode: Option<String>,
    pub cart: Cart,
    /// Volatile: never persisted, gone on restart.
    pub wishlist: Wishlist,
    /// One-shot flag: the first-visit tutorial has been shown.
    pub tutorial_seen: bool,
    /// One-shot flag: the notification-permission prompt has been shown.
    pub notification_prompted: bool,
}

/// The durable subset of a session, as written to disk.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SessionFile {
    cart_items: Vec<CartItem>,
    user_id: Option<String>,
    pincode: Option<String>,
    tutorial_seen: bool,
    notification_prompted: bool,
}

impl Session {
    /// A fresh, anonymous session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Marks the session as logged in.
    pub fn login(&mut self, user_id: &str) {
        self.user_id = Some(user_id.to_string());
        debug!(user_id, "Session logged in");
    }

    /// Logs out and empties the cart. The one-shot flags and the pincode
    /// belong to the device, not the account, and survive.
    pub fn logout(&mut self) {
        self.user_id = None;
        self.cart.clear();
        self.wishlist = Wishlist::default();
        debug!("Session logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Records the confirmed delivery pincode, after format validation.
    pub fn confirm_pincode(&mut self, pincode: &str) -> StoreResult<()> {
        validate_pincode(pincode)?;
        self.pincode = Some(pincode.trim().to_string());
        Ok(())
    }

    pub fn mark_tutorial_seen(&mut self) {
        self.tutorial_seen = true;
    }

    pub fn mark_notification_prompted(&mut self) {
        self.notification_prompted = true;
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Writes the durable subset of this session as JSON.
    pub fn save_to(&self, path: &Path) -> StoreResult<()> {
        let file = SessionFile {
            cart_items: self.cart.items.clone(),
            user_id: self.user_id.clone(),
            pincode: self.pincode.clone(),
            tutorial_seen: self.tutorial_seen,
            notification_prompted: self.notification_prompted,
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::SessionPersistence(e.to_string()))?;
        fs::write(path, json).map_err(|e| StoreError::SessionPersistence(e.to_string()))?;

        debug!(path = %path.display(), "Session saved");
        Ok(())
    }

    /// Restores a session from disk.
    ///
    /// A missing or corrupt file yields a fresh session rather than an
    /// error; the durable keys are a convenience, not a source of truth.
    pub fn load_from(path: &Path) -> Self {
        let file = match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<SessionFile>(&json) {
                Ok(file) => file,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt session file, starting fresh");
                    SessionFile::default()
                }
            },
            Err(_) => SessionFile::default(),
        };

        Session {
            user_id: file.user_id,
            pincode: file.pincode,
            cart: Cart {
                items: file.cart_items,
            },
            tutorial_seen: file.tutorial_seen,
            notification_prompted: file.notification_prompted,
            ..Session::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use crate::store::Store;
    use hind_core::types::UserRole;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hind-session-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn test_roundtrip_persists_durable_keys_only() {
        let store = Store::with_seed(SeedData::demo());
        let rice = store.product("p-rice").unwrap();

        let mut session = Session::new();
        session.login("u-asha");
        session.confirm_pincode("110001").unwrap();
        session.mark_tutorial_seen();
        session.cart.add_item(rice, UserRole::Retailer, 2).unwrap();
        session.wishlist.add("p-tea");

        let path = temp_path("roundtrip");
        session.save_to(&path).unwrap();
        let restored = Session::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(restored.user_id.as_deref(), Some("u-asha"));
        assert_eq!(restored.pincode.as_deref(), Some("110001"));
        assert!(restored.tutorial_seen);
        assert!(!restored.notification_prompted);
        assert_eq!(restored.cart.total_quantity(), 2);
        // The wishlist is volatile.
        assert!(restored.wishlist.is_empty());
    }

    #[test]
    fn test_missing_or_corrupt_file_starts_fresh() {
        let fresh = Session::load_from(Path::new("/nonexistent/hind-session.json"));
        assert!(!fresh.is_logged_in());
        assert!(fresh.cart.is_empty());

        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let fresh = Session::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(!fresh.is_logged_in());
    }

    #[test]
    fn test_logout_clears_account_state_keeps_device_state() {
        let store = Store::with_seed(SeedData::demo());
        let rice = store.product("p-rice").unwrap();

        let mut session = Session::new();
        session.login("u-asha");
        session.confirm_pincode("110002").unwrap();
        session.mark_tutorial_seen();
        session.cart.add_item(rice, UserRole::Retailer, 1).unwrap();

        session.logout();

        assert!(!session.is_logged_in());
        assert!(session.cart.is_empty());
        assert_eq!(session.pincode.as_deref(), Some("110002"));
        assert!(session.tutorial_seen);
    }

    #[test]
    fn test_pincode_validated_before_confirm() {
        let mut session = Session::new();
        assert!(session.confirm_pincode("012345").is_err());
        assert!(session.pincode.is_none());
    }
}
