//! # Hub Configuration
//!
//! Unified configuration for the hub runtime.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. the TOML file named by `GC_CONFIG`, if set
//! 3. `GC_NETWORK_CAPACITY`, `GC_MIN_DELAY_MS`, `GC_MAX_DELAY_MS`, `GC_SIM_SEED`
//!
//! ```toml
//! [bus]
//! channel_capacity = 1024
//!
//! [network]
//! capacity = 6
//!
//! [simulation]
//! enabled = true
//! min_delay_ms = 500
//! max_delay_ms = 3000
//! seed = 42
//! sensor_period_ms = 5000
//! ```

use std::env;
use std::fs;
use std::path::Path;

use gc_02_cube_network::SimulationConfig;
use serde::{Deserialize, Serialize};
use shared_types::CubeId;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`HubConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete hub configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Broker configuration.
    pub bus: BusConfig,
    /// Cube network configuration.
    pub network: NetworkConfig,
    /// Traffic simulation configuration.
    pub simulation: SimulationConfig,
}

/// Broker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Deliveries buffered per subscriber.
    pub channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Cube network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Maximum number of cubes.
    pub capacity: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { capacity: 6 }
    }
}

impl HubConfig {
    /// Load from `GC_CONFIG` and environment overrides, then validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// [`HubConfig::load`] against an arbitrary key lookup.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("GC_CONFIG") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `GC_*` overrides.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(capacity) = parse_var(&lookup, "GC_NETWORK_CAPACITY")? {
            self.network.capacity = capacity;
        }
        if let Some(delay) = parse_var(&lookup, "GC_MIN_DELAY_MS")? {
            self.simulation.min_delay_ms = delay;
        }
        if let Some(delay) = parse_var(&lookup, "GC_MAX_DELAY_MS")? {
            self.simulation.max_delay_ms = delay;
        }
        if let Some(seed) = parse_var(&lookup, "GC_SIM_SEED")? {
            self.simulation.seed = Some(seed);
        }
        Ok(())
    }

    /// Reject inconsistent values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "bus.channel_capacity must be positive".into(),
            ));
        }
        if !(1..=CubeId::SPACE).contains(&self.network.capacity) {
            return Err(ConfigError::Invalid(format!(
                "network.capacity must be in 1..={}, got {}",
                CubeId::SPACE,
                self.network.capacity
            )));
        }
        let sim = &self.simulation;
        if sim.max_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "simulation.max_delay_ms must be positive".into(),
            ));
        }
        if sim.min_delay_ms > sim.max_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "simulation.min_delay_ms ({}) exceeds max_delay_ms ({})",
                sim.min_delay_ms, sim.max_delay_ms
            )));
        }
        if sim.sensor_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "simulation.sensor_period_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{key}={raw:?} is not a valid number")))
        })
        .transpose()
}
