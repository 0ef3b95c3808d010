//! Cross-context change notification bus.
//!
//! # Responsibility
//! - Fan one context's store mutations out to every sibling context.
//! - Suppress echo: a context never observes its own writes.
//!
//! # Invariants
//! - Delivery is per-subscriber FIFO; a change is observed at most once per
//!   subscriber.
//! - Subscribers whose receiving end has been dropped are pruned on the
//!   next publish.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Identity of one store context (one "tab").
pub type OriginId = Uuid;

/// One observed mutation of the shared store.
///
/// `value` is `None` to signal deletion, mirroring the host storage event
/// contract the board's upsert path is written against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
    pub value: Option<String>,
}

impl StoreChange {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn removal(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// In-process publish/subscribe channel shared by sibling store contexts.
///
/// Stands in for the host's cross-context storage event: every subscriber
/// except the originating context receives each published change, queued
/// until that context pumps its receiver.
#[derive(Clone, Default, Debug)]
pub struct ChangeBus {
    subscribers: Arc<Mutex<Vec<(OriginId, Sender<StoreChange>)>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a receiver for changes published by origins other than
    /// `origin`.
    pub fn subscribe(&self, origin: OriginId) -> Receiver<StoreChange> {
        let (sender, receiver) = channel();
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.push((origin, sender));
        receiver
    }

    /// Delivers `change` to every subscriber whose origin differs from the
    /// publishing one.
    pub fn publish(&self, origin: OriginId, change: &StoreChange) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|(subscriber_origin, sender)| {
            if *subscriber_origin == origin {
                return true;
            }
            sender.send(change.clone()).is_ok()
        });
    }

    /// Number of live subscriptions, including the publisher's own.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
