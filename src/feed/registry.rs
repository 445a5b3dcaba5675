//! Subscription registry
//!
//! The registry is the single shared mutable structure of the feed. It owns
//! every subscription record; liveness transitions happen only through the
//! feed's subscribe/unsubscribe/dispatch paths.

use std::collections::HashMap;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::{Order, Pincode};

/// Liveness of a subscription. `Closed` is terminal; a session that wants
/// to resume creates a new subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionState {
    Active,
    Closed,
}

/// Registry-owned record of one live seller session: its identity, the one
/// pincode it filters on, and the outbound half of its transport.
#[derive(Debug)]
pub(crate) struct SubscriptionEntry {
    pub id: Uuid,
    pub pincode: Pincode,
    pub state: SubscriptionState,
    pub tx: mpsc::Sender<Order>,
}

#[derive(Debug, Default)]
pub(crate) struct SubscriptionRegistry {
    entries: HashMap<Uuid, SubscriptionEntry>,
}

impl SubscriptionRegistry {
    /// Idempotent by id: re-inserting an existing id leaves the original
    /// record untouched.
    pub fn insert(&mut self, entry: SubscriptionEntry) {
        self.entries.entry(entry.id).or_insert(entry);
    }

    /// Marks the record closed and removes it. No-op when the id is absent,
    /// so a double close is harmless.
    pub fn remove(&mut self, id: Uuid) -> Option<SubscriptionEntry> {
        self.entries.remove(&id).map(|mut entry| {
            entry.state = SubscriptionState::Closed;
            entry
        })
    }

    /// Every ACTIVE subscription filtered on `pincode`, in no guaranteed
    /// order. A linear scan is fine at single-process cardinality; indexing
    /// by pincode is the production-scale upgrade.
    pub fn active_for<'a>(
        &'a self,
        pincode: &'a Pincode,
    ) -> impl Iterator<Item = &'a SubscriptionEntry> {
        self.entries
            .values()
            .filter(move |entry| entry.state == SubscriptionState::Active && &entry.pincode == pincode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Uuid, pincode: &str) -> (SubscriptionEntry, mpsc::Receiver<Order>) {
        let (tx, rx) = mpsc::channel(4);
        (
            SubscriptionEntry {
                id,
                pincode: Pincode::parse(pincode).unwrap(),
                state: SubscriptionState::Active,
                tx,
            },
            rx,
        )
    }

    #[test]
    fn insert_is_idempotent_by_id() {
        let mut registry = SubscriptionRegistry::default();
        let id = Uuid::new_v4();
        let (first, _rx1) = entry(id, "313001");
        let (second, _rx2) = entry(id, "560001");

        registry.insert(first);
        registry.insert(second);

        assert_eq!(registry.len(), 1);
        let pincode = Pincode::parse("313001").unwrap();
        let kept: Vec<_> = registry.active_for(&pincode).collect();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn remove_tolerates_double_close() {
        let mut registry = SubscriptionRegistry::default();
        let id = Uuid::new_v4();
        let (e, _rx) = entry(id, "313001");
        registry.insert(e);

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.state, SubscriptionState::Closed);
        assert!(registry.remove(id).is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn active_for_matches_exact_pincode_only() {
        let mut registry = SubscriptionRegistry::default();
        let (a, _rx1) = entry(Uuid::new_v4(), "313001");
        let (b, _rx2) = entry(Uuid::new_v4(), "560001");
        registry.insert(a);
        registry.insert(b);

        let pincode = Pincode::parse("313001").unwrap();
        let matched: Vec<_> = registry.active_for(&pincode).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].pincode.as_str(), "313001");
    }
}
