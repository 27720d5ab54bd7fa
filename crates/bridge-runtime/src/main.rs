//! # Event Bridge Runtime
//!
//! Reads messages from stdin, publishes them to the bus, and writes the
//! events the listener forwards to stdout.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`BRIDGE_LOG_LEVEL`, `BRIDGE_JSON_LOGS`)
//! 2. Load bridge configuration from the environment
//! 3. Start the bridge
//! 4. Pump stdin in and forwarded messages out until EOF or Ctrl+C
//! 5. Shut down, printing everything read before the stop

use anyhow::{Context, Result};
use bridge_runtime::{parse_line, render_message, BridgeRuntime};
use bridge_telemetry::{init_logging, TelemetryConfig};
use event_bridge::BridgeConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("failed to initialize logging")?;

    let config = BridgeConfig::from_env().context("failed to load bridge configuration")?;

    let mut runtime = BridgeRuntime::new(&config)?;
    let mut outbound = runtime
        .take_outbound()
        .context("outbound channel unavailable")?;
    runtime.start().await?;

    let printer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            println!("{}", render_message(&message));
        }
    });

    let inbound = runtime.inbound();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Bridge is running. Press Ctrl+C to stop.");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read stdin")? {
                    Some(line) => {
                        if let Some(message) = parse_line(&line) {
                            if inbound.send(message).await.is_err() {
                                warn!("Publisher stopped, dropping input");
                                break;
                            }
                        }
                    }
                    None => {
                        info!("End of input");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
        }
    }

    drop(inbound);
    runtime.shutdown().await;
    if let Err(e) = printer.await {
        warn!(error = %e, "Output printer failed");
    }

    Ok(())
}
