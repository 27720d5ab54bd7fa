//! Test doubles for the bus and channel seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bridge_bus::{BusError, EventBus, EventHandler};
use bridge_types::{Event, Message};
use event_bridge::{ChannelError, MessageChannel};
use parking_lot::Mutex;
use tokio::sync::oneshot;

/// A bus that never delivers on the caller's stack.
///
/// `post` parks the event until [`DeferringBus::flush`]. `send` hands the
/// event to a spawned task that waits `delay` before invoking the
/// listeners, and returns only once that task signals completion.
pub struct DeferringBus {
    handlers: Mutex<Vec<Arc<dyn EventHandler>>>,
    parked: Mutex<Vec<Event>>,
    invocations: Arc<AtomicUsize>,
    delay: Duration,
}

impl DeferringBus {
    pub fn new(delay: Duration) -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            parked: Mutex::new(Vec::new()),
            invocations: Arc::new(AtomicUsize::new(0)),
            delay,
        }
    }

    pub fn register(&self, handler: Arc<dyn EventHandler>) {
        self.handlers.lock().push(handler);
    }

    /// Listener invocations completed so far.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    pub fn parked(&self) -> usize {
        self.parked.lock().len()
    }

    /// Deliver every parked event. Returns the number delivered.
    pub fn flush(&self) -> usize {
        let events: Vec<Event> = self.parked.lock().drain(..).collect();
        let handlers = self.handlers.lock().clone();
        for event in &events {
            for handler in &handlers {
                let _ = handler.handle_event(event);
                self.invocations.fetch_add(1, Ordering::SeqCst);
            }
        }
        events.len()
    }
}

#[async_trait]
impl EventBus for DeferringBus {
    fn post(&self, event: Event) -> Result<(), BusError> {
        self.parked.lock().push(event);
        Ok(())
    }

    async fn send(&self, event: Event) -> Result<(), BusError> {
        let handlers = self.handlers.lock().clone();
        let invocations = Arc::clone(&self.invocations);
        let delay = self.delay;
        let (done_tx, done_rx) = oneshot::channel();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            for handler in &handlers {
                let _ = handler.handle_event(&event);
                invocations.fetch_add(1, Ordering::SeqCst);
            }
            let _ = done_tx.send(());
        });

        done_rx
            .await
            .map_err(|_| BusError::Delivery("delivery task dropped".to_string()))
    }
}

/// A bus whose every dispatch fails with the given error.
pub struct FailingBus(pub BusError);

#[async_trait]
impl EventBus for FailingBus {
    fn post(&self, _event: Event) -> Result<(), BusError> {
        Err(self.0.clone())
    }

    async fn send(&self, _event: Event) -> Result<(), BusError> {
        Err(self.0.clone())
    }
}

/// A channel that records every message it accepts.
#[derive(Default)]
pub struct RecordingChannel {
    messages: Mutex<Vec<Message>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl MessageChannel for RecordingChannel {
    fn send(&self, message: Message) -> Result<(), ChannelError> {
        self.messages.lock().push(message);
        Ok(())
    }
}

/// A channel that refuses every `n`th message (1-based) as full.
pub struct FlakyChannel {
    every: usize,
    seen: AtomicUsize,
    accepted: RecordingChannel,
}

impl FlakyChannel {
    pub fn new(every: usize) -> Self {
        Self {
            every,
            seen: AtomicUsize::new(0),
            accepted: RecordingChannel::new(),
        }
    }

    pub fn accepted(&self) -> Vec<Message> {
        self.accepted.messages()
    }
}

impl MessageChannel for FlakyChannel {
    fn send(&self, message: Message) -> Result<(), ChannelError> {
        let n = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        if n % self.every == 0 {
            return Err(ChannelError::Full);
        }
        self.accepted.send(message)
    }
}
