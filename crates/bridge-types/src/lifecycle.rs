//! # Lifecycle - Host-Managed Start/Stop
//!
//! The contract a hosting runtime uses to start and stop bridge components.
//!
//! ## Example Implementation
//!
//! ```rust,ignore
//! use bridge_types::{Lifecycle, LifecycleError};
//! use async_trait::async_trait;
//!
//! pub struct MyComponent { /* ... */ }
//!
//! #[async_trait]
//! impl Lifecycle for MyComponent {
//!     fn name(&self) -> &'static str { "my-component" }
//!     async fn start(&self) -> Result<(), LifecycleError> { Ok(()) }
//!     async fn stop(&self) -> Result<(), LifecycleError> { Ok(()) }
//!     fn is_running(&self) -> bool { true }
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::errors::LifecycleError;

/// Start/stop capability driven by the host.
///
/// Both hooks must be idempotent: starting a running component or stopping
/// a stopped one is a no-op.
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// Human-readable component name.
    fn name(&self) -> &'static str;

    /// Begin processing.
    async fn start(&self) -> Result<(), LifecycleError>;

    /// Stop processing.
    async fn stop(&self) -> Result<(), LifecycleError>;

    /// Whether the component is currently processing.
    fn is_running(&self) -> bool;
}

/// Two-state running flag for components with no resources to acquire.
#[derive(Debug, Default)]
pub struct LifecycleState {
    running: AtomicBool,
}

impl LifecycleState {
    /// A stopped state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark running. Returns true if the state changed.
    pub fn start(&self) -> bool {
        !self.running.swap(true, Ordering::AcqRel)
    }

    /// Mark stopped. Returns true if the state changed.
    pub fn stop(&self) -> bool {
        self.running.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
