//! Adapters Layer
//!
//! The two directions of the bridge:
//!
//! - `EventPublishingHandler` - channel messages out to the bus
//! - `EventInboundListener` - bus events in to a channel

pub mod listener;
pub mod publisher;

pub use listener::EventInboundListener;
pub use publisher::{EventPublishingHandler, PublisherBuilder};
