//! Cross-crate integration tests.

mod flows;
mod mirroring;
