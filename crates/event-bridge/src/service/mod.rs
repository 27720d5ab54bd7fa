//! Service Layer
//!
//! Stateless conversion logic shared by the adapters.

pub mod mapper;

pub use mapper::{DefaultMessageEventMapper, MessageEventMapper};
