//! # Event Subscriber
//!
//! Defines the receiving side of the event bus: push handlers, subscription
//! handles, and the dispatcher that drains posted events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use bridge_types::Event;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::error::BusError;
use crate::events::SubscriptionFilter;

/// A push receiver invoked by the bus for every matching event.
///
/// Handlers may be called concurrently from several threads with no
/// ordering guarantee between events.
pub trait EventHandler: Send + Sync {
    fn handle_event(&self, event: &Event) -> Result<(), BusError>;
}

impl<F> EventHandler for F
where
    F: Fn(&Event) -> Result<(), BusError> + Send + Sync,
{
    fn handle_event(&self, event: &Event) -> Result<(), BusError> {
        self(event)
    }
}

pub(crate) struct Registration {
    id: u64,
    filter: SubscriptionFilter,
    handler: Arc<dyn EventHandler>,
}

/// Shared handler table.
#[derive(Default)]
pub(crate) struct Registry {
    entries: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
    deliveries: AtomicU64,
    handler_failures: AtomicU64,
}

impl Registry {
    pub(crate) fn register(
        self: &Arc<Self>,
        filter: SubscriptionFilter,
        handler: Arc<dyn EventHandler>,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, topics = ?filter.topics, "New subscription created");
        self.entries.write().push(Registration {
            id,
            filter,
            handler,
        });
        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) {
        self.entries.write().retain(|r| r.id != id);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub(crate) fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    pub(crate) fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    /// Invoke every matching handler. Returns how many were invoked.
    ///
    /// Handlers run outside the table lock so they may subscribe or
    /// unsubscribe re-entrantly.
    pub(crate) fn deliver(&self, event: &Event) -> usize {
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .entries
            .read()
            .iter()
            .filter(|r| r.filter.matches(event.topic()))
            .map(|r| Arc::clone(&r.handler))
            .collect();

        for handler in &handlers {
            if let Err(e) = handler.handle_event(event) {
                self.handler_failures.fetch_add(1, Ordering::Relaxed);
                warn!(topic = event.topic(), error = %e, "Event handler failed");
            }
        }

        self.deliveries
            .fetch_add(handlers.len() as u64, Ordering::Relaxed);
        trace!(topic = event.topic(), handlers = handlers.len(), "Event delivered");
        handlers.len()
    }
}

/// A subscription handle.
///
/// When dropped, the handler is removed from the bus.
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the handler now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry.remove(self.id);
        debug!(id = self.id, "Subscription dropped");
    }
}

/// Delivers events accepted by `post`.
///
/// Obtained once from [`crate::InMemoryEventBus::dispatcher`]. Either spawn
/// [`Dispatcher::run`] or call [`Dispatcher::drain`] to deliver on demand.
pub struct Dispatcher {
    receiver: mpsc::UnboundedReceiver<Event>,
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<Event>, registry: Arc<Registry>) -> Self {
        Self { receiver, registry }
    }

    /// Deliver posted events until the bus is closed or dropped.
    pub async fn run(mut self) {
        debug!("Event dispatcher started");
        while let Some(event) = self.receiver.recv().await {
            self.registry.deliver(&event);
        }
        debug!("Event dispatcher stopped");
    }

    /// Deliver every event queued so far. Returns how many were delivered.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.registry.deliver(&event);
            count += 1;
        }
        count
    }
}
