//! # PTP Notifier
//!
//! Entry point for the PTP status notifier.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (`PTP_LOG_LEVEL`, `PTP_JSON_LOGS`, ...)
//! 2. Load notifier configuration from the environment
//! 3. Start the runtime: publication, status listener, first event, ticks
//! 4. Run until Ctrl+C, then shut down gracefully

use anyhow::{Context, Result};
use tracing::info;

use notifier_runtime::NotifierRuntime;
use ptp_notifier::NotifierConfig;
use sync_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    let config = NotifierConfig::from_env().context("Failed to load notifier configuration")?;

    let runtime = NotifierRuntime::new(config);
    runtime.start().await?;

    info!("Notifier is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await;

    Ok(())
}
