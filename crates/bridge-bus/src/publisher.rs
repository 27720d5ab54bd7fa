//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bridge_types::Event;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::BusError;
use crate::events::SubscriptionFilter;
use crate::subscriber::{Dispatcher, EventHandler, Registry, Subscription};

/// Trait for publishing events to the bus.
///
/// This is the only surface the bridge uses to reach the bus.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Accept an event for later delivery and return immediately.
    ///
    /// Delivery happens on a schedule owned by the bus.
    fn post(&self, event: Event) -> Result<(), BusError>;

    /// Deliver an event to every matching handler before returning.
    async fn send(&self, event: Event) -> Result<(), BusError>;
}

/// Counters exposed by [`InMemoryEventBus::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    pub subscribers: usize,
    pub events_posted: u64,
    pub events_sent: u64,
    pub deliveries: u64,
    pub handler_failures: u64,
}

/// In-memory implementation of the event bus.
///
/// `post` pushes onto an unbounded queue; the queue is drained by the
/// [`Dispatcher`] taken from [`InMemoryEventBus::dispatcher`]. `send`
/// delivers on the caller's task. Suitable for single-process use; a
/// distributed deployment would put a broker behind [`EventBus`] instead.
pub struct InMemoryEventBus {
    registry: Arc<Registry>,
    queue: Mutex<Option<mpsc::UnboundedSender<Event>>>,
    dispatcher: Mutex<Option<Dispatcher>>,
    closed: AtomicBool,
    events_posted: AtomicU64,
    events_sent: AtomicU64,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(Registry::default());
        let (queue, receiver) = mpsc::unbounded_channel();
        Self {
            dispatcher: Mutex::new(Some(Dispatcher::new(receiver, Arc::clone(&registry)))),
            registry,
            queue: Mutex::new(Some(queue)),
            closed: AtomicBool::new(false),
            events_posted: AtomicU64::new(0),
            events_sent: AtomicU64::new(0),
        }
    }

    /// Register a handler for events matching `filter`.
    ///
    /// The handler stays registered until the returned handle is dropped.
    #[must_use]
    pub fn subscribe(
        &self,
        filter: SubscriptionFilter,
        handler: Arc<dyn EventHandler>,
    ) -> Subscription {
        self.registry.register(filter, handler)
    }

    /// Take the dispatcher for posted events. Returns `None` after the first call.
    pub fn dispatcher(&self) -> Option<Dispatcher> {
        self.dispatcher.lock().take()
    }

    /// Stop accepting events. Already queued events are still delivered.
    ///
    /// Releases the queue, so [`Dispatcher::run`] returns once it has
    /// delivered everything posted before the close.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.queue.lock().take();
            info!("Event bus closed");
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn stats(&self) -> BusStats {
        BusStats {
            subscribers: self.registry.len(),
            events_posted: self.events_posted.load(Ordering::Relaxed),
            events_sent: self.events_sent.load(Ordering::Relaxed),
            deliveries: self.registry.deliveries(),
            handler_failures: self.registry.handler_failures(),
        }
    }

    fn ensure_open(&self, event: &Event) -> Result<(), BusError> {
        if self.is_closed() {
            warn!(topic = event.topic(), "Event rejected (bus closed)");
            return Err(BusError::Closed);
        }
        Ok(())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    fn post(&self, event: Event) -> Result<(), BusError> {
        self.ensure_open(&event)?;
        debug!(topic = event.topic(), "Event posted");
        let queue = self.queue.lock();
        let Some(queue) = queue.as_ref() else {
            return Err(BusError::Closed);
        };
        queue
            .send(event)
            .map_err(|_| BusError::Delivery("dispatcher queue closed".to_string()))?;
        self.events_posted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn send(&self, event: Event) -> Result<(), BusError> {
        self.ensure_open(&event)?;
        let handlers = self.registry.deliver(&event);
        self.events_sent.fetch_add(1, Ordering::Relaxed);
        debug!(topic = event.topic(), handlers, "Event sent");
        Ok(())
    }
}
