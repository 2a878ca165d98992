//! # Hind Store
//!
//! The in-memory entity store and mutation API for Hind General Store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         hind-store                                      │
//! │                                                                         │
//! │  ┌──────────────┐      ┌──────────────────────────────────────────┐    │
//! │  │   Session    │      │                Store                     │    │
//! │  │  (per-user)  │      │         (single entity owner)            │    │
//! │  │              │      │                                          │    │
//! │  │  user_id     │      │  users  products  orders                 │    │
//! │  │  pincode     │─────►│  coupons  expenses  tickets  config      │    │
//! │  │  cart        │      │                                          │    │
//! │  │  wishlist    │      │  Mutation API (impl blocks):             │    │
//! │  └──────┬───────┘      │  ├── orders    lifecycle + refund rule   │    │
//! │         │              │  ├── wallet    ledger + khata terms      │    │
//! │    JSON session        │  ├── catalog   stock + fan-out + guard   │    │
//! │    file (durable       │  ├── users     signup/login/prefs        │    │
//! │    keys only)          │  ├── coupons   code lifecycle            │    │
//! │                        │  ├── tickets   support threads           │    │
//! │                        │  └── expenses  bookkeeping               │    │
//! │                        │                                          │    │
//! │                        │  reports: read-side projections          │    │
//! │                        └──────────────────────────────────────────┘    │
//! │                                                                         │
//! │  Seeded once from SeedData; every later change goes through the        │
//! │  Mutation API. SharedStore (Arc<Mutex>) is the embedding contract      │
//! │  for hosts that drive the store from more than one thread.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure domain logic (money, pricing, cart, validation) lives in
//! [`hind_core`]; this crate owns state and the rules that guard it.

pub mod error;
pub mod reports;
pub mod seed;
pub mod session;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use reports::{CustomerSpend, MonthlySummary, ProductSales};
pub use seed::SeedData;
pub use session::Session;
pub use store::orders::{OrderDraft, OrderStatusChange};
pub use store::users::{ProfileUpdate, SignUpForm, OWNER_LOGIN_ALIAS};
pub use store::{SharedStore, Store};
