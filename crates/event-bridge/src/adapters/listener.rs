//! Inbound listener: bus events to channel messages.
//!
//! Registered with the bus as an [`EventHandler`]. For each event it decides,
//! against its topic filter set, how many messages to emit downstream:
//!
//! 1. empty filter set: one message, whatever the topic
//! 2. no matcher: one message if the topic is literally in the set
//! 3. otherwise one message per matching pattern ([`FanOut::PerPattern`]),
//!    or at most one ([`FanOut::Once`])
//!
//! Every emitted message carries the event as its payload and a header map
//! that mirrors the event's properties.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use bridge_bus::{BusError, EventHandler};
use bridge_types::{Event, Lifecycle, LifecycleError, LifecycleState, Message, Value};
use tracing::{debug, info, trace, warn};

use crate::domain::{
    FanOut, GlobMatcher, ListenerConfig, MatcherKind, TopicFilterSet, TopicMatcher,
};
use crate::error::BridgeError;
use crate::metrics::ListenerStats;
use crate::ports::MessageChannel;

type MatcherSlot = Option<Arc<dyn TopicMatcher>>;

/// Forwards matching bus events into a message channel.
///
/// Starts stopped; call [`Lifecycle::start`] before events are forwarded.
pub struct EventInboundListener<C: MessageChannel> {
    topics: TopicFilterSet,
    matcher: ArcSwap<MatcherSlot>,
    fan_out: FanOut,
    output: C,
    state: LifecycleState,
    received: AtomicU64,
    filtered: AtomicU64,
    forwarded: AtomicU64,
    forward_failures: AtomicU64,
}

impl<C: MessageChannel> EventInboundListener<C> {
    /// A listener with no topics (forward everything) and the glob matcher.
    pub fn new(output: C) -> Self {
        Self {
            topics: TopicFilterSet::new(),
            matcher: ArcSwap::from_pointee(Some(
                Arc::new(GlobMatcher::new()) as Arc<dyn TopicMatcher>
            )),
            fan_out: FanOut::default(),
            output,
            state: LifecycleState::new(),
            received: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            forwarded: AtomicU64::new(0),
            forward_failures: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &ListenerConfig, output: C) -> Self {
        let listener = Self::new(output).with_fan_out(config.fan_out);
        listener.set_topics(config.topics.iter().cloned());
        if config.matcher == MatcherKind::Exact {
            listener.set_topic_matcher(None);
        }
        listener
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    #[must_use]
    pub fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    /// Replace the filter set. Evaluations already in flight finish against
    /// the previous set.
    pub fn set_topics<I, S>(&self, topics: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics.replace(topics);
        info!(topics = ?self.topics.snapshot(), "Listener topics updated");
    }

    /// The current filter set, in sorted order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.topics.snapshot().iter().cloned().collect()
    }

    /// Install a pattern matcher, or `None` for exact membership.
    pub fn set_topic_matcher(&self, matcher: Option<Arc<dyn TopicMatcher>>) {
        debug!(exact = matcher.is_none(), "Listener topic matcher replaced");
        self.matcher.store(Arc::new(matcher));
    }

    /// Count of messages `topic` should produce under the current settings.
    fn match_count(&self, topic: &str) -> usize {
        let topics = self.topics.snapshot();
        if topics.is_empty() {
            return 1;
        }

        let matcher = self.matcher.load();
        let matched = match matcher.as_deref() {
            Some(matcher) => topics
                .iter()
                .filter(|pattern| matcher.matches(pattern, topic))
                .count(),
            None => usize::from(topics.contains(topic)),
        };

        match self.fan_out {
            FanOut::PerPattern => matched,
            FanOut::Once => matched.min(1),
        }
    }

    /// Forward `event` downstream. Returns the number of messages emitted.
    ///
    /// A channel error aborts this event only.
    pub fn on_event(&self, event: &Event) -> Result<usize, BridgeError> {
        if !self.state.is_running() {
            trace!(topic = event.topic(), "Listener stopped, event ignored");
            return Ok(0);
        }
        self.received.fetch_add(1, Ordering::Relaxed);

        let count = self.match_count(event.topic());
        if count == 0 {
            self.filtered.fetch_add(1, Ordering::Relaxed);
            trace!(topic = event.topic(), "Event filtered out");
            return Ok(0);
        }

        let payload = Arc::new(event.clone());
        for _ in 0..count {
            let headers = event
                .property_names()
                .into_iter()
                .filter_map(|key| event.property(key).map(|value| (key, value.clone())));
            let message = Message::builder(Value::Event(Arc::clone(&payload)))
                .copy_headers(headers)
                .build();
            let message_id = message.id();

            if let Err(e) = self.output.send(message) {
                self.forward_failures.fetch_add(1, Ordering::Relaxed);
                warn!(topic = event.topic(), error = %e, "Failed to forward event");
                return Err(e.into());
            }

            self.forwarded.fetch_add(1, Ordering::Relaxed);
            debug!(topic = event.topic(), message_id = %message_id, "Event forwarded");
        }

        Ok(count)
    }

    #[must_use]
    pub fn stats(&self) -> ListenerStats {
        ListenerStats {
            events_received: self.received.load(Ordering::Relaxed),
            events_filtered: self.filtered.load(Ordering::Relaxed),
            messages_forwarded: self.forwarded.load(Ordering::Relaxed),
            forward_failures: self.forward_failures.load(Ordering::Relaxed),
        }
    }
}

impl<C: MessageChannel> EventHandler for EventInboundListener<C> {
    fn handle_event(&self, event: &Event) -> Result<(), BusError> {
        self.on_event(event)
            .map(|_| ())
            .map_err(|e| BusError::Handler {
                topic: event.topic().to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl<C: MessageChannel> Lifecycle for EventInboundListener<C> {
    fn name(&self) -> &'static str {
        "event-inbound-listener"
    }

    async fn start(&self) -> Result<(), LifecycleError> {
        if self.output.is_closed() {
            return Err(LifecycleError::StartFailed {
                component: self.name(),
                reason: "output channel is closed".to_string(),
            });
        }
        if self.state.start() {
            info!(topics = self.topics.len(), fan_out = ?self.fan_out, "Listener started");
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), LifecycleError> {
        if self.state.stop() {
            info!(stats = ?self.stats(), "Listener stopped");
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.state.is_running()
    }
}
