//! # Hub Runtime
//!
//! Owns the broker connection and every service, with an explicit
//! lifecycle: create, run, scoped shutdown.
//!
//! ```text
//!   cloud ──publish──→ Broker ──deliveries──→ BusIngressAdapter
//!                        ↑                          │
//!                        │                    IngressService
//!                        │                          │
//!                        ├──── replies / errors ────┘
//!                        │
//!                        └──── signals ──── SimulationScheduler
//!                                                   │
//!                                          CubeNetworkService
//! ```
//!
//! Ingress and the simulator publish through the same broker client, so
//! the hub never receives its own traffic.

use std::future::Future;
use std::sync::Arc;

use gc_01_ingress::{BusIngressAdapter, Dispatcher, IngressService, IngressStats};
use gc_02_cube_network::{CubeNetwork, CubeNetworkService, SimulationScheduler, SimulationStats};
use gyro_telemetry::log_event;
use shared_bus::{BrokerClient, InMemoryBroker};
use shared_types::SensorPeriod;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{error, info};

use crate::config::HubConfig;

const SUBSYSTEM: &str = "hub-runtime";

/// Errors from running the hub.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// What the hub did before shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ingress: IngressStats,
    /// `None` when simulation was disabled.
    pub simulation: Option<SimulationStats>,
}

/// The hub runtime wiring broker, ingress and simulator together.
pub struct HubRuntime {
    config: HubConfig,
    broker: InMemoryBroker,
    hub_client: BrokerClient,
    ingress: Arc<IngressService<BrokerClient>>,
    adapter: BusIngressAdapter<IngressService<BrokerClient>>,
    network: Arc<CubeNetworkService<BrokerClient>>,
    sensor_period: SensorPeriod,
    shutdown_tx: watch::Sender<bool>,
}

impl HubRuntime {
    /// Build every component from `config`. The ingress subscription is
    /// open from here on, so traffic published before
    /// [`HubRuntime::run_until`] is processed once it runs.
    pub fn new(config: HubConfig) -> Self {
        let broker = InMemoryBroker::with_capacity(config.bus.channel_capacity);
        let hub_client = broker.client();
        let sensor_period = SensorPeriod::new(config.simulation.sensor_period_ms);

        let ingress = Arc::new(IngressService::new(
            hub_client.clone(),
            Dispatcher::with_builtin_handlers(sensor_period.clone()),
        ));

        let adapter = BusIngressAdapter::connect(Arc::clone(&ingress), &hub_client);

        let network = match config.simulation.seed {
            Some(seed) => CubeNetwork::with_seed(config.network.capacity, seed),
            None => CubeNetwork::new(config.network.capacity),
        };
        let network = Arc::new(CubeNetworkService::new(network, hub_client.clone()));

        let (shutdown_tx, _) = watch::channel(false);

        info!(
            hub_client = %hub_client.id(),
            network_capacity = config.network.capacity,
            simulation = config.simulation.enabled,
            "Hub runtime created"
        );

        Self {
            config,
            broker,
            hub_client,
            ingress,
            adapter,
            network,
            sensor_period,
            shutdown_tx,
        }
    }

    /// The broker, for connecting cloud-side clients.
    pub fn broker(&self) -> &InMemoryBroker {
        &self.broker
    }

    /// The client the hub publishes with.
    pub fn hub_client(&self) -> &BrokerClient {
        &self.hub_client
    }

    pub fn ingress(&self) -> Arc<IngressService<BrokerClient>> {
        Arc::clone(&self.ingress)
    }

    pub fn network(&self) -> Arc<CubeNetworkService<BrokerClient>> {
        Arc::clone(&self.network)
    }

    /// Shared sensor period, updated by period requests.
    pub fn sensor_period(&self) -> SensorPeriod {
        self.sensor_period.clone()
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Run ingress and, if enabled, the simulator until `signal` resolves.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal shutdown to every task
    /// 2. Wait for the tasks to finish their current message
    /// 3. Close the broker
    pub async fn run_until<F>(self, signal: F) -> Result<RunSummary, RuntimeError>
    where
        F: Future<Output = ()>,
    {
        let Self {
            config,
            broker,
            adapter,
            network,
            sensor_period,
            shutdown_tx,
            ..
        } = self;

        let ingress_task = tokio::spawn(adapter.run(shutdown_tx.subscribe()));

        let simulation_task = config.simulation.enabled.then(|| {
            let scheduler = SimulationScheduler::new(network, &config.simulation, sensor_period);
            tokio::spawn(scheduler.run(shutdown_tx.subscribe()))
        });

        log_event!(info, SUBSYSTEM, "Hub runtime started", simulation = simulation_task.is_some());

        signal.await;

        log_event!(info, SUBSYSTEM, "Initiating graceful shutdown");
        if let Err(e) = shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let ingress = ingress_task.await?;
        let simulation = match simulation_task {
            Some(task) => Some(task.await?),
            None => None,
        };
        broker.close();

        log_event!(
            info,
            SUBSYSTEM,
            "Shutdown complete",
            received = ingress.received,
            rejected = ingress.rejected,
            published = broker.messages_published()
        );

        Ok(RunSummary {
            ingress,
            simulation,
        })
    }
}
