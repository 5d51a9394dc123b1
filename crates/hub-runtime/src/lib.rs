//! # GyroCube Hub Runtime
//!
//! Configuration and lifecycle for the hub process.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (from env)
//! 2. Load and validate [`HubConfig`]
//! 3. Build the broker, ingress pipeline and cube network
//! 4. Run until Ctrl+C, then shut down in order

pub mod config;
pub mod runtime;

pub use config::{BusConfig, ConfigError, HubConfig, NetworkConfig};
pub use runtime::{HubRuntime, RunSummary, RuntimeError};
