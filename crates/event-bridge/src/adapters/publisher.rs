//! Outbound publisher: channel messages to bus events.
//!
//! Each message is mapped to an event and dispatched with the configured
//! [`DeliveryMode`]. A mapping or delivery failure fails that one message;
//! nothing is retried here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bridge_bus::EventBus;
use bridge_types::Message;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::{DeliveryMode, PublisherConfig};
use crate::error::BridgeError;
use crate::metrics::PublisherStats;
use crate::ports::MessageHandler;
use crate::service::{DefaultMessageEventMapper, MessageEventMapper};

/// Publishes channel messages as bus events.
pub struct EventPublishingHandler {
    bus: Arc<dyn EventBus>,
    mapper: Arc<dyn MessageEventMapper>,
    delivery_mode: DeliveryMode,
    published: AtomicU64,
    mapping_failures: AtomicU64,
    delivery_failures: AtomicU64,
}

impl EventPublishingHandler {
    pub fn builder() -> PublisherBuilder {
        PublisherBuilder::default()
    }

    /// Create a publisher from configuration using the default mapper.
    pub fn from_config(
        config: &PublisherConfig,
        bus: Arc<dyn EventBus>,
    ) -> Result<Self, BridgeError> {
        Self::builder()
            .bus(bus)
            .delivery_mode(config.delivery_mode)
            .default_topic(config.default_topic.clone())
            .build()
    }

    #[must_use]
    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    /// Map `message` and dispatch it to the bus.
    ///
    /// With [`DeliveryMode::Sync`] this returns only after the bus has run
    /// every matching listener.
    pub async fn handle(&self, message: &Message) -> Result<(), BridgeError> {
        let event = self.mapper.to_event(message).map_err(|e| {
            self.mapping_failures.fetch_add(1, Ordering::Relaxed);
            warn!(
                message_id = %message.id(),
                error = %e,
                "Message could not be mapped to an event"
            );
            e
        })?;
        let topic = event.topic().to_string();

        let result = match self.delivery_mode {
            DeliveryMode::Async => self.bus.post(event),
            DeliveryMode::Sync => self.bus.send(event).await,
        };

        if let Err(e) = result {
            self.delivery_failures.fetch_add(1, Ordering::Relaxed);
            warn!(topic = %topic, mode = %self.delivery_mode, error = %e, "Event delivery failed");
            return Err(e.into());
        }

        self.published.fetch_add(1, Ordering::Relaxed);
        debug!(
            message_id = %message.id(),
            topic = %topic,
            mode = %self.delivery_mode,
            "Event published"
        );
        Ok(())
    }

    /// Consume messages from a channel until it closes.
    ///
    /// This should be spawned as a background task.
    pub async fn run(self: Arc<Self>, mut messages: mpsc::Receiver<Message>) {
        info!(mode = %self.delivery_mode, "[EventPublishingHandler] Started consuming messages");

        while let Some(message) = messages.recv().await {
            if let Err(e) = self.handle(&message).await {
                error!(message_id = %message.id(), "Error publishing message: {}", e);
            }
        }

        info!("[EventPublishingHandler] Message channel closed, shutting down");
    }

    #[must_use]
    pub fn stats(&self) -> PublisherStats {
        PublisherStats {
            published: self.published.load(Ordering::Relaxed),
            mapping_failures: self.mapping_failures.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl MessageHandler for EventPublishingHandler {
    async fn handle_message(&self, message: Message) -> Result<(), BridgeError> {
        self.handle(&message).await
    }
}

/// Builder for [`EventPublishingHandler`].
///
/// The bus is mandatory and checked in [`PublisherBuilder::build`], so a
/// misconfigured publisher fails at setup rather than on its first message.
#[derive(Default)]
pub struct PublisherBuilder {
    bus: Option<Arc<dyn EventBus>>,
    mapper: Option<Arc<dyn MessageEventMapper>>,
    delivery_mode: DeliveryMode,
    default_topic: Option<String>,
}

impl PublisherBuilder {
    pub fn bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Replace the default mapper. `default_topic` is then unused.
    pub fn mapper(mut self, mapper: Arc<dyn MessageEventMapper>) -> Self {
        self.mapper = Some(mapper);
        self
    }

    pub fn delivery_mode(mut self, mode: DeliveryMode) -> Self {
        self.delivery_mode = mode;
        self
    }

    pub fn default_topic(mut self, topic: Option<String>) -> Self {
        self.default_topic = topic;
        self
    }

    pub fn build(self) -> Result<EventPublishingHandler, BridgeError> {
        let bus = self
            .bus
            .ok_or_else(|| BridgeError::Configuration("event bus is required".to_string()))?;

        let mapper = self.mapper.unwrap_or_else(|| {
            Arc::new(DefaultMessageEventMapper::new(self.default_topic))
        });

        Ok(EventPublishingHandler {
            bus,
            mapper,
            delivery_mode: self.delivery_mode,
            published: AtomicU64::new(0),
            mapping_failures: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
        })
    }
}
