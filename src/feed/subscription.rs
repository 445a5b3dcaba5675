//! Subscriber-side session handle

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::Stream;
use uuid::Uuid;

use crate::domain::{Order, Pincode};

use super::bus::OrderFeed;

/// Receiving end of one seller session.
///
/// The sequence never terminates on its own; it ends only when the session
/// is closed. Dropping the handle closes the subscription and removes it
/// from the feed's registry, so a departed session never sees another
/// dispatch cycle.
pub struct OrderSubscription {
    id: Uuid,
    pincode: Pincode,
    rx: mpsc::Receiver<Order>,
    feed: OrderFeed,
}

impl OrderSubscription {
    pub(crate) fn new(id: Uuid, pincode: Pincode, rx: mpsc::Receiver<Order>, feed: OrderFeed) -> Self {
        Self { id, pincode, rx, feed }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pincode(&self) -> &Pincode {
        &self.pincode
    }

    /// Next order placed for this session's pincode. Returns `None` only
    /// once the subscription has been closed and its buffer drained.
    pub async fn recv(&mut self) -> Option<Order> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Result<Order, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }

    /// Explicit unsubscribe; equivalent to dropping the handle.
    pub fn close(self) {}

    /// Adapts the session into a `Stream` of orders for transports that
    /// consume streams. Dropping the stream closes the subscription.
    pub fn into_stream(self) -> OrderStream {
        OrderStream { inner: self }
    }

    /// Kills the receiving half without unsubscribing, simulating a
    /// transport failure the registry has not observed yet.
    #[cfg(test)]
    pub(crate) fn sever_transport(&mut self) {
        self.rx.close();
    }
}

impl Drop for OrderSubscription {
    fn drop(&mut self) {
        self.feed.unsubscribe(self.id);
    }
}

/// `Stream` adapter over [`OrderSubscription`].
pub struct OrderStream {
    inner: OrderSubscription,
}

impl OrderStream {
    pub fn pincode(&self) -> &Pincode {
        self.inner.pincode()
    }
}

impl Stream for OrderStream {
    type Item = Order;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.rx.poll_recv(cx)
    }
}
