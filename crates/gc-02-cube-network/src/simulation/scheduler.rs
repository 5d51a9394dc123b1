//! # Simulation Scheduler
//!
//! Drives a [`CubeNetworkService`] with random events at random intervals
//! and periodic sensor readings.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_bus::{Transport, TransportError};
use shared_types::SensorPeriod;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{error, info, warn};

use super::config::SimulationConfig;
use crate::service::{CubeNetworkService, ServiceError};

/// One simulated network event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Join,
    Exit,
    Flip,
}

impl Action {
    /// Pick an event that is legal for the current population.
    ///
    /// Empty networks can only grow, full networks cannot.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R, len: usize, capacity: usize) -> Self {
        if len == 0 {
            return Self::Join;
        }
        let options: &[Self] = if len >= capacity {
            &[Self::Exit, Self::Flip]
        } else {
            &[Self::Join, Self::Exit, Self::Flip]
        };
        options[rng.gen_range(0..options.len())]
    }
}

/// What the scheduler did before stopping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub events: u64,
    pub readings: u64,
    pub failures: u64,
}

/// Random event loop over a cube network.
pub struct SimulationScheduler<T> {
    service: Arc<CubeNetworkService<T>>,
    period: SensorPeriod,
    min_delay: Duration,
    max_delay: Duration,
    rng: StdRng,
}

impl<T: Transport> SimulationScheduler<T> {
    /// Create a scheduler reading its sensor period from `period`.
    pub fn new(
        service: Arc<CubeNetworkService<T>>,
        config: &SimulationConfig,
        period: SensorPeriod,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let min_delay = config.min_delay().min(config.max_delay());
        Self {
            service,
            period,
            min_delay,
            max_delay: config.max_delay(),
            rng,
        }
    }

    /// Run until `shutdown` flips to `true` or the transport closes.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> SimulationStats {
        let mut stats = SimulationStats::default();
        let mut next_event = Instant::now() + self.next_delay();
        let mut next_reading = Instant::now() + self.reading_period();

        info!(
            min_delay_ms = self.min_delay.as_millis() as u64,
            max_delay_ms = self.max_delay.as_millis() as u64,
            "Simulation started"
        );

        loop {
            let result = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Simulation shutdown signal received");
                        break;
                    }
                    continue;
                }
                _ = sleep_until(next_event) => {
                    next_event = Instant::now() + self.next_delay();
                    stats.events += 1;
                    self.step().await
                }
                _ = sleep_until(next_reading) => {
                    next_reading = Instant::now() + self.reading_period();
                    stats.readings += 1;
                    self.service.measure().await.map(|_| ())
                }
            };

            match result {
                Ok(()) => {}
                Err(ServiceError::Transport(TransportError::Closed)) => {
                    error!("Transport closed, simulation stopping");
                    stats.failures += 1;
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Simulated event failed");
                    stats.failures += 1;
                }
            }
        }

        info!(
            events = stats.events,
            readings = stats.readings,
            failures = stats.failures,
            "Simulation stopped"
        );
        stats
    }

    /// Perform one random network event.
    pub async fn step(&mut self) -> Result<(), ServiceError> {
        let action = Action::choose(&mut self.rng, self.service.len(), self.service.capacity());
        match action {
            Action::Join => self.service.join(None).await.map(|_| ()),
            Action::Exit => self.service.exit(None).await.map(|_| ()),
            Action::Flip => self.service.flip_random().await.map(|_| ()),
        }
    }

    fn next_delay(&mut self) -> Duration {
        self.rng.gen_range(self.min_delay..=self.max_delay)
    }

    fn reading_period(&self) -> Duration {
        Duration::from_millis(self.period.get_ms().max(1))
    }
}
