//! # GyroCube Hub
//!
//! Entry point for the hub process.

use anyhow::{Context, Result};
use gyro_telemetry::TelemetryConfig;
use hub_runtime::{HubConfig, HubRuntime};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    gyro_telemetry::init_telemetry(&TelemetryConfig::from_env())
        .context("failed to initialize telemetry")?;

    let config = HubConfig::load().context("failed to load hub configuration")?;
    let runtime = HubRuntime::new(config);

    info!("Hub is running. Press Ctrl+C to stop.");
    let summary = runtime
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await
        .context("hub runtime failed")?;

    info!(?summary, "Hub stopped");
    Ok(())
}
