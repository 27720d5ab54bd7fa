//! # Bridge Types Crate
//!
//! Envelopes shared by both directions of the channel/bus bridge.
//!
//! ## Design Principles
//!
//! - **Immutable envelopes**: `Message` and `Event` expose read-only views once built.
//! - **One value model**: payloads, headers and event properties all carry a [`Value`].
//! - **Copy, never alias**: building an `Event` from a `Message` copies the header
//!   map, so later changes on one side never leak into the other.

pub mod errors;
pub mod event;
pub mod headers;
pub mod lifecycle;
pub mod message;
pub mod value;

pub use errors::{EventError, LifecycleError};
pub use event::{Event, Properties};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use message::{Headers, Message, MessageBuilder};
pub use value::{Fault, Value};
