//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for hub logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,

    /// Log level filter directive (e.g. `info`, `gc_01_ingress=debug,info`)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// Whether to emit JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "gyrocube-hub".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GC_SERVICE_NAME`: Service name (default: gyrocube-hub)
    /// - `GC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `GC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `GC_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container = lookup("KUBERNETES_SERVICE_HOST").is_some()
            || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("GC_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("GC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("GC_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("GC_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }
}
