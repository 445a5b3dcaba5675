//! Event bus and dispatch engine

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{OrderPlaced, Pincode};

use super::registry::{SubscriptionEntry, SubscriptionRegistry, SubscriptionState};
use super::subscription::OrderSubscription;

/// Outbound buffer per seller session. A session that falls this many
/// undelivered events behind is closed and must resubscribe.
pub const DEFAULT_SESSION_BUFFER: usize = 64;

/// In-process publish/subscribe feed for placed orders.
///
/// One instance per running server, constructed at startup and shared by
/// handle clones; independent instances never interact, so parallel tests
/// each build their own. There is no replay: a publish reaches exactly the
/// sessions registered at that moment.
#[derive(Clone)]
pub struct OrderFeed {
    registry: Arc<RwLock<SubscriptionRegistry>>,
    capacity: usize,
}

impl OrderFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SESSION_BUFFER)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: Arc::new(RwLock::new(SubscriptionRegistry::default())),
            capacity,
        }
    }

    /// Registers a live session filtered on exactly one pincode and returns
    /// its receiving handle. Dropping the handle unsubscribes it.
    pub fn subscribe(&self, pincode: Pincode) -> OrderSubscription {
        let (tx, rx) = mpsc::channel(self.capacity);
        let id = Uuid::new_v4();
        if let Ok(mut registry) = self.registry.write() {
            registry.insert(SubscriptionEntry {
                id,
                pincode: pincode.clone(),
                state: SubscriptionState::Active,
                tx,
            });
        }
        debug!(subscription = %id, pincode = %pincode, "seller session subscribed");
        OrderSubscription::new(id, pincode, rx, self.clone())
    }

    /// Transitions the subscription to CLOSED and removes it from the
    /// registry. Unknown ids are ignored, so a double close is harmless.
    pub fn unsubscribe(&self, id: Uuid) {
        let Ok(mut registry) = self.registry.write() else {
            return;
        };
        if registry.remove(id).is_some() {
            debug!(subscription = %id, "seller session unsubscribed");
        }
    }

    /// One dispatch cycle: fans the event out to every active subscription
    /// filtered on the event's pincode and returns the delivery count.
    ///
    /// Deliveries are non-blocking and independent per session. A session
    /// whose transport has gone away, or whose buffer is full, is removed
    /// before the next cycle; neither case surfaces to the publisher, and
    /// neither stops delivery to the remaining matches in this cycle.
    pub fn publish(&self, event: OrderPlaced) -> usize {
        let mut delivered = 0usize;
        let mut defunct: Vec<Uuid> = Vec::new();

        {
            let Ok(registry) = self.registry.read() else {
                return 0;
            };
            for entry in registry.active_for(event.pincode()) {
                match entry.tx.try_send(event.order.clone()) {
                    Ok(()) => delivered += 1,
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        debug!(subscription = %entry.id, "transport gone, closing subscription");
                        defunct.push(entry.id);
                    }
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        warn!(
                            subscription = %entry.id,
                            pincode = %entry.pincode,
                            "session buffer full, closing lagging subscription"
                        );
                        defunct.push(entry.id);
                    }
                }
            }
        }

        for id in defunct {
            self.unsubscribe(id);
        }

        if delivered == 0 {
            debug!(pincode = %event.pincode(), "order event had no live subscribers");
        }
        delivered
    }

    /// Number of registered subscriptions across all pincodes.
    pub fn subscriber_count(&self) -> usize {
        self.registry.read().map(|registry| registry.len()).unwrap_or(0)
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderStatus};
    use std::time::Duration;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::time::timeout;

    fn pincode(s: &str) -> Pincode {
        Pincode::parse(s).unwrap()
    }

    fn order_for(pin: &str) -> OrderPlaced {
        OrderPlaced::new(Order::place("Atta", "123 Lake Rd", pincode(pin)))
    }

    #[tokio::test]
    async fn delivers_only_to_matching_pincode() {
        let feed = OrderFeed::new();
        let mut seller_a = feed.subscribe(pincode("313001"));
        let mut seller_b = feed.subscribe(pincode("560001"));

        assert_eq!(feed.publish(order_for("313001")), 1);

        let got = timeout(Duration::from_millis(100), seller_a.recv())
            .await
            .expect("timeout")
            .expect("order");
        assert_eq!(got.pincode.as_str(), "313001");
        assert_eq!(got.status, OrderStatus::Pending);
        assert!(matches!(seller_b.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn each_match_gets_exactly_one_delivery() {
        let feed = OrderFeed::new();
        let mut first = feed.subscribe(pincode("313001"));
        let mut second = feed.subscribe(pincode("313001"));

        assert_eq!(feed.publish(order_for("313001")), 2);

        assert!(first.try_recv().is_ok());
        assert!(matches!(first.try_recv(), Err(TryRecvError::Empty)));
        assert!(second.try_recv().is_ok());
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_is_not_an_error() {
        let feed = OrderFeed::new();
        assert_eq!(feed.publish(order_for("110001")), 0);
    }

    #[tokio::test]
    async fn unsubscribed_session_gets_nothing_and_publish_still_succeeds() {
        let feed = OrderFeed::new();
        let session = feed.subscribe(pincode("110001"));
        session.close();

        assert_eq!(feed.subscriber_count(), 0);
        assert_eq!(feed.publish(order_for("110001")), 0);
    }

    #[tokio::test]
    async fn dropping_the_handle_unregisters_the_session() {
        let feed = OrderFeed::new();
        {
            let _session = feed.subscribe(pincode("110001"));
            assert_eq!(feed.subscriber_count(), 1);
        }
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn late_subscriber_never_sees_earlier_events() {
        let feed = OrderFeed::new();
        feed.publish(order_for("313001"));

        let mut late = feed.subscribe(pincode("313001"));
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn failed_transport_is_skipped_removed_and_does_not_block_others() {
        let feed = OrderFeed::new();
        let mut live = feed.subscribe(pincode("313001"));
        let mut broken = feed.subscribe(pincode("313001"));
        broken.sever_transport();

        assert_eq!(feed.publish(order_for("313001")), 1);
        assert!(live.try_recv().is_ok());
        assert_eq!(feed.subscriber_count(), 1);

        // The failed session is never matched again.
        assert_eq!(feed.publish(order_for("313001")), 1);
        assert!(live.try_recv().is_ok());
    }

    #[tokio::test]
    async fn lagging_session_is_closed_instead_of_stalling_dispatch() {
        let feed = OrderFeed::with_capacity(1);
        let mut fast = feed.subscribe(pincode("313001"));
        let _slow = feed.subscribe(pincode("313001"));

        assert_eq!(feed.publish(order_for("313001")), 2);
        assert!(fast.try_recv().is_ok());

        // slow never drained, so its buffer is full: it gets closed while
        // fast still receives.
        assert_eq!(feed.publish(order_for("313001")), 1);
        assert_eq!(feed.subscriber_count(), 1);
        assert!(fast.try_recv().is_ok());
    }

    #[tokio::test]
    async fn same_pincode_events_arrive_in_publish_order() {
        let feed = OrderFeed::new();
        let mut session = feed.subscribe(pincode("313001"));

        for name in ["Atta", "Ghee", "Chai"] {
            feed.publish(OrderPlaced::new(Order::place(name, "addr", pincode("313001"))));
        }

        for expected in ["Atta", "Ghee", "Chai"] {
            let got = session.recv().await.expect("order");
            assert_eq!(got.product_name, expected);
        }
    }

    #[tokio::test]
    async fn independent_feeds_do_not_cross_deliver() {
        let feed_a = OrderFeed::new();
        let feed_b = OrderFeed::new();
        let mut on_b = feed_b.subscribe(pincode("313001"));

        assert_eq!(feed_a.publish(order_for("313001")), 0);
        assert!(matches!(on_b.try_recv(), Err(TryRecvError::Empty)));
    }
}
