//! Real-time order notification
//!
//! One [`OrderFeed`] per running server fans each placed order out to the
//! seller sessions subscribed to that order's pincode. This is a live feed,
//! not a log: nothing is buffered for absent subscribers and missed events
//! are not replayed. Filtering happens at dispatch, so a session's stream
//! only ever carries orders for its own pincode.

mod bus;
mod registry;
mod subscription;

pub use bus::{OrderFeed, DEFAULT_SESSION_BUFFER};
pub use registry::SubscriptionState;
pub use subscription::{OrderStream, OrderSubscription};
