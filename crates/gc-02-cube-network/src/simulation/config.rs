use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulation timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Run the scheduler at all.
    pub enabled: bool,
    /// Lower bound of the delay between network events.
    pub min_delay_ms: u64,
    /// Upper bound of the delay between network events.
    pub max_delay_ms: u64,
    /// Seed for reproducible runs. Entropy when `None`.
    pub seed: Option<u64>,
    /// Initial sensor period, adjustable at runtime by period requests.
    pub sensor_period_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_delay_ms: 500,
            max_delay_ms: 3_000,
            seed: None,
            sensor_period_ms: shared_types::SensorPeriod::DEFAULT_MS,
        }
    }
}

impl SimulationConfig {
    /// Fast timings for tests.
    pub fn for_testing() -> Self {
        Self {
            enabled: true,
            min_delay_ms: 5,
            max_delay_ms: 20,
            seed: Some(7),
            sensor_period_ms: 10,
        }
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}
