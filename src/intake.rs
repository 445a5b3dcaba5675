//! Order intake
//!
//! Validates a candidate order, checks the pincode is serviceable, persists
//! the order, and only then publishes the placement event. The event is a
//! best-effort notification: its delivery outcome never affects the result
//! reported to the caller.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

use crate::domain::{Order, OrderPlaced, Pincode};
use crate::error::MarketError;
use crate::feed::OrderFeed;
use crate::store::MarketStore;

/// Candidate order payload as submitted by a customer.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[validate(custom = "not_blank")]
    pub product_name: String,
    #[validate(custom = "not_blank")]
    pub customer_address: String,
    #[validate(custom = "not_blank")]
    pub pincode: String,
}

pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("required"));
    }
    Ok(())
}

pub struct OrderIntake {
    store: Arc<dyn MarketStore>,
    feed: OrderFeed,
}

impl OrderIntake {
    pub fn new(store: Arc<dyn MarketStore>, feed: OrderFeed) -> Self {
        Self { store, feed }
    }

    /// Places an order.
    ///
    /// The placement event is published only after the order has been
    /// durably persisted; a publish that reaches zero subscribers is still
    /// a successful placement.
    pub async fn place_order(&self, new: NewOrder) -> Result<Order, MarketError> {
        new.validate()?;
        let pincode = Pincode::parse(&new.pincode)?;

        let sellers = self.store.find_sellers_by_pincode(&pincode).await?;
        if sellers.is_empty() {
            return Err(MarketError::NotServiceable(pincode));
        }

        let order = Order::place(new.product_name, new.customer_address, pincode);
        self.store.save_order(&order).await?;
        info!(order = %order.id, pincode = %order.pincode, "order placed");

        let delivered = self.feed.publish(OrderPlaced::new(order.clone()));
        debug!(order = %order.id, deliveries = delivered, "placement event dispatched");

        Ok(order)
    }
}
