//! HyperLocal Market
//!
//! Pincode-scoped marketplace with a live seller order feed.
//!
//! ## Features
//! - Seller registration and product listing per pincode
//! - Pincode-scoped product and order browsing
//! - Order placement with serviceability checks
//! - Real-time order notifications to subscribed seller sessions
//!
//! Notifications are in-process and best-effort by design: an order event
//! reaches exactly the sessions subscribed to its pincode at publish time,
//! and a missed event is not replayed.

pub mod api;
pub mod domain;
pub mod error;
pub mod feed;
pub mod intake;
pub mod store;

pub use api::{router, AppState};
pub use error::MarketError;
pub use feed::{OrderFeed, OrderStream, OrderSubscription};
pub use intake::{NewOrder, OrderIntake};
pub use store::{MarketStore, MemStore, PgStore, StoreError};
