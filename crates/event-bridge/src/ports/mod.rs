//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - how channel infrastructure reaches the bridge
//! - Driven Ports (outbound) - where the bridge emits messages

pub mod inbound;
pub mod outbound;

pub use inbound::MessageHandler;
pub use outbound::MessageChannel;
