//! Domain events carried over the live feed

use super::order::Order;
use super::pincode::Pincode;

/// Immutable snapshot of an order at creation time.
///
/// Published exactly once; only sessions subscribed at publish time ever see
/// it. The event itself is never persisted — the order's own lifecycle is.
#[derive(Clone, Debug)]
pub struct OrderPlaced {
    pub order: Order,
}

impl OrderPlaced {
    pub fn new(order: Order) -> Self {
        Self { order }
    }

    /// Routing key for dispatch.
    pub fn pincode(&self) -> &Pincode {
        &self.order.pincode
    }
}
