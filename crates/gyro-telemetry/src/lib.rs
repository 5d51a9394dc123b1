//! # Gyro Telemetry
//!
//! Logging setup shared by the hub binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gyro_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> Result<(), gyro_telemetry::TelemetryError> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     gyro_telemetry::log_event!(info, "hub", "Ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GC_SERVICE_NAME` | `gyrocube-hub` | Service name in startup logs |
//! | `GC_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `GC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `GC_JSON_LOGS` | `false` | JSON lines instead of pretty output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize hub telemetry.
///
/// Call once, early in `main`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_logging(config)
}
