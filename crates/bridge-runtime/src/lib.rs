//! # Bridge Runtime
//!
//! Wires one event bridge around an in-memory bus.
//!
//! ```text
//!  inbound() ──Message──→ EventPublishingHandler ──post/send──→ InMemoryEventBus
//!                                                                     │
//!  take_outbound() ←──Message── EventInboundListener ←──Event─────────┘
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Build bus, publisher and listener from [`BridgeConfig`]
//! 2. Subscribe the listener to the bus
//! 3. Spawn the bus dispatcher and the publisher loop
//! 4. Start the listener
//!
//! ## Shutdown Sequence
//!
//! 1. Drop the inbound sender; the publisher loop ends once it has handled
//!    every queued message
//! 2. Close the bus; the dispatcher ends once it has delivered every posted
//!    event
//! 3. Stop the listener

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bridge_bus::{InMemoryEventBus, Subscription, SubscriptionFilter};
use bridge_types::{Lifecycle, Message};
use event_bridge::{BridgeConfig, EventInboundListener, EventPublishingHandler};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Capacity of the inbound and outbound message channels.
pub const CHANNEL_CAPACITY: usize = 1024;

/// How long shutdown waits for each background task to drain.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

type Listener = EventInboundListener<mpsc::Sender<Message>>;

/// A running bridge: bus, publisher, listener and their tasks.
pub struct BridgeRuntime {
    bus: Arc<InMemoryEventBus>,
    publisher: Arc<EventPublishingHandler>,
    listener: Arc<Listener>,
    _subscription: Subscription,
    inbound_tx: mpsc::Sender<Message>,
    inbound_rx: Option<mpsc::Receiver<Message>>,
    outbound_rx: Option<mpsc::Receiver<Message>>,
    publisher_task: Option<JoinHandle<()>>,
    dispatcher_task: Option<JoinHandle<()>>,
}

impl BridgeRuntime {
    /// Build the bridge. Nothing runs until [`BridgeRuntime::start`].
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        config.validate().context("invalid bridge configuration")?;
        info!(?config, "Creating event bridge runtime");

        let bus = Arc::new(InMemoryEventBus::new());

        let publisher = Arc::new(
            EventPublishingHandler::from_config(&config.publisher, bus.clone())
                .context("failed to build publisher")?,
        );

        let (outbound_tx, outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let listener = Arc::new(EventInboundListener::from_config(&config.listener, outbound_tx));
        let subscription = bus.subscribe(SubscriptionFilter::all(), listener.clone());

        let (inbound_tx, inbound_rx) = mpsc::channel(CHANNEL_CAPACITY);

        Ok(Self {
            bus,
            publisher,
            listener,
            _subscription: subscription,
            inbound_tx,
            inbound_rx: Some(inbound_rx),
            outbound_rx: Some(outbound_rx),
            publisher_task: None,
            dispatcher_task: None,
        })
    }

    /// Spawn the dispatcher and publisher tasks and start the listener.
    pub async fn start(&mut self) -> Result<()> {
        let inbound_rx = self
            .inbound_rx
            .take()
            .context("bridge runtime already started")?;
        let dispatcher = self
            .bus
            .dispatcher()
            .context("bus dispatcher already taken")?;

        self.dispatcher_task = Some(tokio::spawn(dispatcher.run()));
        self.publisher_task = Some(tokio::spawn(Arc::clone(&self.publisher).run(inbound_rx)));

        self.listener
            .start()
            .await
            .context("failed to start listener")?;

        info!(
            mode = %self.publisher.delivery_mode(),
            topics = ?self.listener.topics(),
            "Event bridge started"
        );
        Ok(())
    }

    /// Sender feeding the outbound publisher.
    #[must_use]
    pub fn inbound(&self) -> mpsc::Sender<Message> {
        self.inbound_tx.clone()
    }

    /// Receiver of messages forwarded by the listener. Available once.
    pub fn take_outbound(&mut self) -> Option<mpsc::Receiver<Message>> {
        self.outbound_rx.take()
    }

    #[must_use]
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    #[must_use]
    pub fn publisher(&self) -> Arc<EventPublishingHandler> {
        Arc::clone(&self.publisher)
    }

    #[must_use]
    pub fn listener(&self) -> Arc<Listener> {
        Arc::clone(&self.listener)
    }

    /// Drain and stop the bridge.
    ///
    /// Messages already handed to [`BridgeRuntime::inbound`] are published
    /// and delivered before the listener stops. Callers must drop their
    /// inbound senders first, or the publisher drain runs into its timeout.
    pub async fn shutdown(self) {
        info!("Initiating graceful shutdown...");

        let Self {
            bus,
            publisher,
            listener,
            inbound_tx,
            inbound_rx,
            publisher_task,
            dispatcher_task,
            ..
        } = self;

        drop(inbound_tx);
        drop(inbound_rx);
        if let Some(task) = publisher_task {
            join_drained("publisher", task).await;
        }

        bus.close();
        if let Some(task) = dispatcher_task {
            join_drained("dispatcher", task).await;
        }

        if let Err(e) = listener.stop().await {
            error!("Failed to stop listener: {}", e);
        }

        info!(
            publisher = ?publisher.stats(),
            listener = ?listener.stats(),
            bus = ?bus.stats(),
            "Shutdown complete"
        );
    }
}

/// Wait for a task to finish on its own; abort it past [`DRAIN_TIMEOUT`].
async fn join_drained(name: &str, mut task: JoinHandle<()>) {
    match tokio::time::timeout(DRAIN_TIMEOUT, &mut task).await {
        Ok(Ok(())) => info!(task = name, "Task drained"),
        Ok(Err(e)) => error!(task = name, error = %e, "Task failed"),
        Err(_) => {
            error!(task = name, timeout = ?DRAIN_TIMEOUT, "Task did not drain in time");
            task.abort();
        }
    }
}

/// Parse one input line: `<topic> <payload>`, or a bare `<payload>` when
/// the line has no space. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Message> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let message = match line.split_once(' ') {
        Some((topic, payload)) => Message::builder(payload_value(payload.trim()))
            .header(bridge_types::headers::TOPIC, topic)
            .build(),
        None => Message::new(payload_value(line)),
    };
    Some(message)
}

/// JSON payloads stay structured; anything else is a string.
fn payload_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

/// Render a forwarded message as one JSON line.
pub fn render_message(message: &Message) -> serde_json::Value {
    let event = message.payload().as_event();
    let mut headers: Vec<&str> = message.headers().keys().map(String::as_str).collect();
    headers.sort_unstable();

    let source_payload = event
        .and_then(|e| e.property(bridge_types::headers::EVENT))
        .and_then(|v| v.as_message())
        .and_then(|m| m.payload().as_json())
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    serde_json::json!({
        "id": message.id().to_string(),
        "topic": event.map(|e| e.topic()),
        "headers": headers,
        "payload": source_payload,
    })
}
