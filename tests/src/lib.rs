//! # Event Bridge Test Suite
//!
//! Cross-crate tests that wire the publisher, a bus and the listener
//! together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── doubles.rs        # Test-double buses and channels
//! └── integration/
//!     ├── flows.rs      # publisher → in-memory bus → listener → channel
//!     ├── delivery.rs   # async vs sync dispatch against a deferring bus
//!     ├── mirroring.rs  # header/property fidelity in both directions
//!     └── concurrency.rs# filter replacement under concurrent delivery
//!
//! tests/benches/
//! └── bridge_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bridge-tests
//! cargo test -p bridge-tests integration::delivery
//! cargo bench -p bridge-tests
//! ```

#![allow(dead_code)]

pub mod doubles;
pub mod integration;
