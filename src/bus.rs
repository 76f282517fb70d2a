//! Cross-component sync bus
//!
//! Process-wide synchronous publish/subscribe for [`StorefrontEvent`].
//! Delivery is in-line and best-effort: publishing with no subscribers is a
//! no-op, and there is no queuing or replay for subscribers that attach
//! after an event fired. Handlers run while the registry is locked, so they
//! must not publish or subscribe from within.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

use crate::domain::events::StorefrontEvent;

type Handler = Box<dyn Fn(&StorefrontEvent) + Send + 'static>;
type Registry = Mutex<HashMap<u64, Handler>>;

/// Cheap to clone; clones share the same subscriber registry.
#[derive(Clone, Default)]
pub struct SyncBus {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    handlers: Registry,
    next_id: Mutex<u64>,
}

impl SyncBus {
    pub fn new() -> Self { Self::default() }

    /// Register a handler for every published event. Keep the returned
    /// [`Subscription`] and call `unsubscribe` to detach; dropping it without
    /// unsubscribing leaves the handler attached for the bus lifetime.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&StorefrontEvent) + Send + 'static,
    {
        let id = {
            let mut next = self.inner.next_id.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            *next += 1;
            *next
        };
        self.inner
            .handlers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(id, Box::new(handler));
        Subscription { id, bus: Arc::downgrade(&self.inner) }
    }

    /// Dispatch an event synchronously to every current subscriber.
    pub fn publish(&self, event: &StorefrontEvent) {
        let handlers = self.inner.handlers.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        debug!(subscribers = handlers.len(), "dispatching storefront event");
        for handler in handlers.values() {
            handler(event);
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.handlers.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }
}

/// Handle to a registered subscriber.
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Detach the handler. Safe to call after the bus is gone.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.handlers.lock().unwrap_or_else(std::sync::PoisonError::into_inner).remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cart_event() -> StorefrontEvent {
        StorefrontEvent::CartUpdated { items: vec![] }
    }

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let bus = SyncBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let a = {
            let seen = seen.clone();
            bus.subscribe(move |_| { seen.fetch_add(1, Ordering::SeqCst); })
        };
        let b = {
            let seen = seen.clone();
            bus.subscribe(move |_| { seen.fetch_add(1, Ordering::SeqCst); })
        };
        bus.publish(&cart_event());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        a.unsubscribe();
        b.unsubscribe();
    }

    #[test]
    fn test_unsubscribe_detaches_handler() {
        let bus = SyncBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let sub = {
            let seen = seen.clone();
            bus.subscribe(move |_| { seen.fetch_add(1, Ordering::SeqCst); })
        };
        bus.publish(&cart_event());
        sub.unsubscribe();
        bus.publish(&cart_event());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = SyncBus::new();
        bus.publish(&cart_event());
    }

    #[test]
    fn test_no_replay_for_late_subscribers() {
        let bus = SyncBus::new();
        bus.publish(&cart_event());
        let seen = Arc::new(AtomicUsize::new(0));
        let sub = {
            let seen = seen.clone();
            bus.subscribe(move |_| { seen.fetch_add(1, Ordering::SeqCst); })
        };
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        sub.unsubscribe();
    }
}
