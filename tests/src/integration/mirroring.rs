//! # Envelope Fidelity
//!
//! - Outbound: message headers survive as event properties, plus the
//!   reserved keys the mapper adds.
//! - Inbound: forwarded message headers are an exact mirror of the event's
//!   properties.
//! - Faults carry their error object, type and text end to end.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bridge_bus::{InMemoryEventBus, SubscriptionFilter};
    use bridge_types::{headers, Event, Fault, Lifecycle, Message, Properties, Value};
    use event_bridge::{
        DefaultMessageEventMapper, DeliveryMode, EventInboundListener, EventPublishingHandler,
        MessageEventMapper,
    };
    use proptest::prelude::*;
    use thiserror::Error;

    use crate::doubles::RecordingChannel;

    #[derive(Debug, Error)]
    #[error("payment declined: {0}")]
    struct PaymentDeclined(&'static str);

    fn started_listener(
        output: Arc<RecordingChannel>,
    ) -> Arc<EventInboundListener<Arc<RecordingChannel>>> {
        let listener = Arc::new(EventInboundListener::new(output));
        block_on(listener.start()).unwrap();
        listener
    }

    /// Runs a future to completion on a throwaway runtime.
    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[tokio::test]
    async fn test_fault_enrichment_end_to_end() {
        let bus = Arc::new(InMemoryEventBus::new());
        let output = Arc::new(RecordingChannel::new());
        let listener = Arc::new(EventInboundListener::new(Arc::clone(&output)));
        listener.start().await.unwrap();
        let _sub = bus.subscribe(SubscriptionFilter::all(), listener.clone());

        let publisher = EventPublishingHandler::builder()
            .bus(bus.clone())
            .delivery_mode(DeliveryMode::Sync)
            .default_topic(Some("errors/payments".to_string()))
            .build()
            .unwrap();

        let fault = Fault::new(PaymentDeclined("insufficient funds"));
        let source = Message::builder(fault.clone())
            .header("order-id", "o-17")
            .build();
        publisher.handle(&source).await.unwrap();

        let forwarded = output.messages();
        assert_eq!(forwarded.len(), 1);
        let out = &forwarded[0];

        assert_eq!(out.header(headers::EXCEPTION), Some(&Value::Fault(fault)));
        assert_eq!(
            out.header(headers::EXCEPTION_CLASS).and_then(Value::as_str),
            Some(std::any::type_name::<PaymentDeclined>())
        );
        assert_eq!(
            out.header(headers::EXCEPTION_MESSAGE).and_then(Value::as_str),
            Some("payment declined: insufficient funds")
        );
        assert_eq!(
            out.header(headers::EVENT).and_then(Value::as_message),
            Some(&source)
        );
        assert_eq!(out.header("order-id").and_then(Value::as_str), Some("o-17"));
        assert_eq!(
            out.header(headers::TIMESTAMP).and_then(Value::as_u64),
            Some(source.timestamp())
        );
    }

    #[tokio::test]
    async fn test_plain_message_has_no_exception_keys() {
        let bus = Arc::new(InMemoryEventBus::new());
        let output = Arc::new(RecordingChannel::new());
        let listener = Arc::new(EventInboundListener::new(Arc::clone(&output)));
        listener.start().await.unwrap();
        let _sub = bus.subscribe(SubscriptionFilter::all(), listener.clone());

        let publisher = EventPublishingHandler::builder()
            .bus(bus.clone())
            .delivery_mode(DeliveryMode::Sync)
            .build()
            .unwrap();
        publisher
            .handle(&Message::builder("ok").header(headers::TOPIC, "t").build())
            .await
            .unwrap();

        let out = &output.messages()[0];
        for key in [
            headers::EXCEPTION,
            headers::EXCEPTION_CLASS,
            headers::EXCEPTION_MESSAGE,
        ] {
            assert!(out.header(key).is_none(), "unexpected {key}");
        }
    }

    fn property_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[ -~]{0,16}".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn forwarded_headers_mirror_event_properties(
            topic in "[a-z]{1,6}(/[a-z]{1,6}){0,3}",
            properties in prop::collection::hash_map("[a-z-]{1,10}", property_value(), 0..12),
        ) {
            let output = Arc::new(RecordingChannel::new());
            let listener = started_listener(Arc::clone(&output));

            let properties: Properties = properties.into_iter().collect();
            let event = Event::new(topic, properties).unwrap();
            prop_assert_eq!(listener.on_event(&event).unwrap(), 1);

            let forwarded = output.messages();
            prop_assert_eq!(forwarded[0].headers(), event.properties());
            prop_assert_eq!(forwarded[0].payload().as_event(), Some(&event));
        }

        #[test]
        fn mapped_event_keeps_user_headers(
            user in prop::collection::hash_map("x-[a-z]{1,8}", any::<u64>(), 0..8),
        ) {
            let message = Message::builder("p")
                .header(headers::TOPIC, "t")
                .copy_headers(user.iter().map(|(k, v)| (k.clone(), Value::from(*v))))
                .build();
            let event = DefaultMessageEventMapper::default().to_event(&message).unwrap();

            for (key, value) in &user {
                prop_assert_eq!(event.property(key).and_then(Value::as_u64), Some(*value));
            }
            prop_assert!(event.contains_property(headers::TIMESTAMP));
            prop_assert!(event.contains_property(headers::EVENT));
        }
    }
}
