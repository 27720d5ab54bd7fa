//! # Bridge Bus - Topic-Addressed Event Bus
//!
//! The publish/subscribe side of the bridge. The bridge only ever talks to
//! the bus through [`EventBus`] (`post`/`send`) and receives events through
//! [`EventHandler`]; [`InMemoryEventBus`] is a reference implementation for
//! single-process deployments and tests.
//!
//! ```text
//! ┌──────────────┐   post()/send()    ┌──────────────┐
//! │  Publisher   │ ─────────────────► │  Event Bus   │
//! └──────────────┘                    │              │
//!                                     │  topic match │
//! ┌──────────────┐  handle_event()    │              │
//! │   Listener   │ ◄───────────────── │              │
//! └──────────────┘                    └──────────────┘
//! ```
//!
//! ## Delivery
//!
//! - **post:** accepted onto a queue and returned immediately; a [`Dispatcher`]
//!   delivers it later.
//! - **send:** every matching handler has been invoked when the call returns.
//! - A failing handler is logged and skipped; it never stops fan-out.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod events;
pub mod publisher;
pub mod subscriber;

pub use error::BusError;
pub use events::SubscriptionFilter;
pub use publisher::{BusStats, EventBus, InMemoryEventBus};
pub use subscriber::{Dispatcher, EventHandler, Subscription};

/// Topic segment separator.
pub const TOPIC_SEPARATOR: char = '/';

/// Subscription pattern matching every topic.
pub const WILDCARD_ALL: &str = "*";
