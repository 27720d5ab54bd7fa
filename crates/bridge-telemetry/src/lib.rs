//! # Bridge Telemetry
//!
//! Logging bootstrap for the event bridge: a `tracing-subscriber` registry
//! with an `EnvFilter` and either a plain or a JSON `fmt` layer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BRIDGE_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `BRIDGE_JSON_LOGS` | `false` | JSON output |
//! | `BRIDGE_CONSOLE_OUTPUT` | `true` | Console output |
//! | `BRIDGE_SERVICE_NAME` | `event-bridge` | Service name |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
