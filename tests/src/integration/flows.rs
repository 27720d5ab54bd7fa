//! # Bridge Flows
//!
//! Messages published on one side come back out of the listener on the
//! other, through the real in-memory bus:
//!
//! ```text
//! Message → EventPublishingHandler → InMemoryEventBus → EventInboundListener → channel
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bridge_bus::{BusError, InMemoryEventBus, SubscriptionFilter};
    use bridge_types::{headers, Lifecycle, Message};
    use event_bridge::{
        BridgeConfig, BridgeError, DeliveryMode, EventInboundListener, EventPublishingHandler,
        FanOut,
    };
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use crate::doubles::RecordingChannel;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn message(topic: &str, payload: &str) -> Message {
        Message::builder(payload).header(headers::TOPIC, topic).build()
    }

    struct Bridge {
        bus: Arc<InMemoryEventBus>,
        publisher: EventPublishingHandler,
        listener: Arc<EventInboundListener<Arc<RecordingChannel>>>,
        output: Arc<RecordingChannel>,
        _subscription: bridge_bus::Subscription,
    }

    async fn bridge(config: BridgeConfig, bus_filter: SubscriptionFilter) -> Bridge {
        config.validate().unwrap();
        let bus = Arc::new(InMemoryEventBus::new());
        let publisher =
            EventPublishingHandler::from_config(&config.publisher, bus.clone()).unwrap();
        let output = Arc::new(RecordingChannel::new());
        let listener = Arc::new(EventInboundListener::from_config(
            &config.listener,
            Arc::clone(&output),
        ));
        let subscription = bus.subscribe(bus_filter, listener.clone());
        listener.start().await.unwrap();

        Bridge {
            bus,
            publisher,
            listener,
            output,
            _subscription: subscription,
        }
    }

    // =============================================================================
    // SYNC FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_sync_publish_reaches_listener_before_return() {
        let config = BridgeConfig::default()
            .with_delivery_mode(DeliveryMode::Sync)
            .with_topics(["orders/*"]);
        let b = bridge(config, SubscriptionFilter::all()).await;

        b.publisher.handle(&message("orders/created", "o-1")).await.unwrap();
        b.publisher.handle(&message("payments/created", "p-1")).await.unwrap();

        let forwarded = b.output.messages();
        assert_eq!(forwarded.len(), 1);
        let event = forwarded[0].payload().as_event().unwrap();
        assert_eq!(event.topic(), "orders/created");
        assert_eq!(b.listener.stats().events_filtered, 1);
    }

    #[tokio::test]
    async fn test_bus_filter_and_listener_filter_both_apply() {
        // The bus only delivers orders/*, the listener only forwards */created.
        let config = BridgeConfig::default()
            .with_delivery_mode(DeliveryMode::Sync)
            .with_topics(["*/created"]);
        let b = bridge(config, SubscriptionFilter::topics(["orders/*"])).await;

        for topic in ["orders/created", "orders/shipped", "payments/created"] {
            b.publisher.handle(&message(topic, "x")).await.unwrap();
        }

        let topics: Vec<String> = b
            .output
            .messages()
            .iter()
            .filter_map(|m| m.payload().as_event().map(|e| e.topic().to_string()))
            .collect();
        assert_eq!(topics, vec!["orders/created"]);
        assert_eq!(b.listener.stats().events_received, 2);
    }

    #[tokio::test]
    async fn test_overlapping_patterns_forward_per_pattern() {
        let config = BridgeConfig::default()
            .with_delivery_mode(DeliveryMode::Sync)
            .with_topics(["a/*", "a/b"]);
        let b = bridge(config, SubscriptionFilter::all()).await;

        b.publisher.handle(&message("a/b", "x")).await.unwrap();

        assert_eq!(b.output.len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_patterns_forward_once() {
        let config = BridgeConfig::default()
            .with_delivery_mode(DeliveryMode::Sync)
            .with_topics(["a/*", "a/b"])
            .with_fan_out(FanOut::Once);
        let b = bridge(config, SubscriptionFilter::all()).await;

        b.publisher.handle(&message("a/b", "x")).await.unwrap();

        assert_eq!(b.output.len(), 1);
    }

    #[tokio::test]
    async fn test_stopped_listener_forwards_nothing() {
        let config = BridgeConfig::default().with_delivery_mode(DeliveryMode::Sync);
        let b = bridge(config, SubscriptionFilter::all()).await;

        b.listener.stop().await.unwrap();
        b.publisher.handle(&message("a", "x")).await.unwrap();
        assert!(b.output.is_empty());

        b.listener.start().await.unwrap();
        b.publisher.handle(&message("a", "y")).await.unwrap();
        assert_eq!(b.output.len(), 1);
    }

    // =============================================================================
    // ASYNC FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_async_publish_delivered_by_dispatcher() {
        let config = BridgeConfig::default().with_topics(["jobs/**"]);
        let b = bridge(config, SubscriptionFilter::all()).await;
        let mut dispatcher = b.bus.dispatcher().unwrap();

        b.publisher.handle(&message("jobs/a/done", "1")).await.unwrap();
        b.publisher.handle(&message("jobs/b", "2")).await.unwrap();
        assert!(b.output.is_empty());

        assert_eq!(dispatcher.drain(), 2);
        assert_eq!(b.output.len(), 2);
        assert_eq!(b.bus.stats().events_posted, 2);
    }

    #[tokio::test]
    async fn test_async_publish_with_running_dispatcher() {
        let bus = Arc::new(InMemoryEventBus::new());
        let publisher = EventPublishingHandler::builder()
            .bus(bus.clone())
            .default_topic(Some("fallback".to_string()))
            .build()
            .unwrap();
        let (tx, mut rx) = mpsc::channel(16);
        let listener = Arc::new(EventInboundListener::new(tx));
        let _sub = bus.subscribe(SubscriptionFilter::all(), listener.clone());
        listener.start().await.unwrap();

        let dispatcher = bus.dispatcher().unwrap();
        let task = tokio::spawn(dispatcher.run());

        publisher.handle(&Message::new("no header")).await.unwrap();

        let forwarded = timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(forwarded.payload().as_event().unwrap().topic(), "fallback");

        task.abort();
    }

    // =============================================================================
    // FAILURES
    // =============================================================================

    #[tokio::test]
    async fn test_closed_bus_surfaces_delivery_error() {
        let config = BridgeConfig::default().with_delivery_mode(DeliveryMode::Sync);
        let b = bridge(config, SubscriptionFilter::all()).await;
        b.bus.close();

        let result = b.publisher.handle(&message("a", "x")).await;

        assert_eq!(result, Err(BridgeError::Delivery(BusError::Closed)));
        assert!(b.output.is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_topic_never_reaches_bus() {
        let config = BridgeConfig::default().with_delivery_mode(DeliveryMode::Sync);
        let b = bridge(config, SubscriptionFilter::all()).await;

        let result = b.publisher.handle(&Message::new("orphan")).await;

        assert!(matches!(result, Err(BridgeError::Configuration(_))));
        assert_eq!(b.bus.stats().events_sent, 0);
        assert!(b.output.is_empty());
    }
}
