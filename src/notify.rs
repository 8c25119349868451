//! Change notifications: an explicit publish step after successful mutations.
//!
//! Delivery is synchronous and fire-and-forget; there is no queue and no
//! coalescing, so a slow observer blocks the mutating call's return.
//! Subscribers own their own re-query scheduling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Published after a mutation, scoped to the URI the mutation addressed.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub uri: String,
    pub kind: ChangeKind,
}

pub type ChangeObserver = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Token returned from `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered set of change observers.
#[derive(Default)]
pub struct ChangeHub {
    observers: RwLock<HashMap<u64, ChangeObserver>>,
    next_id: AtomicU64,
}

impl ChangeHub {
    pub fn new() -> Self {
        ChangeHub::default()
    }

    pub fn subscribe(&self, observer: ChangeObserver) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .write()
            .expect("observer lock poisoned")
            .insert(id, observer);
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers
            .write()
            .expect("observer lock poisoned")
            .remove(&id.0);
    }

    pub fn publish(&self, event: &ChangeEvent) {
        let observers = self.observers.read().expect("observer lock poisoned");
        tracing::debug!(uri = %event.uri, kind = ?event.kind, subscribers = observers.len(), "change");
        for observer in observers.values() {
            observer(event);
        }
    }
}
