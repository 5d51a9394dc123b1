//! # Cube Network Simulator
//!
//! An in-memory population of GyroCube devices that join, leave, flip and
//! report sensor readings, producing valid hub traffic.
//!
//! ## Architecture
//!
//! - **Domain Layer:** `Cube`, `CubeNetwork` and `NetworkError`
//! - **Service Layer:** `CubeNetworkService`, one mutation in flight, each
//!   event published as envelopes
//! - **Simulation:** `SimulationScheduler`, random events on a timer
//!
//! ## Example
//!
//! ```rust,ignore
//! use gc_02_cube_network::{CubeNetwork, CubeNetworkService};
//! use shared_bus::InMemoryBroker;
//!
//! let broker = InMemoryBroker::new();
//! let service = CubeNetworkService::new(CubeNetwork::new(2), broker.client());
//! let id = service.join(None).await?;
//! service.flip(id, None).await?;
//! service.exit(Some(id.as_u8())).await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod service;
pub mod simulation;

pub use domain::{Cube, CubeNetwork, Flip, NetworkError, Reading};
pub use service::{CubeNetworkService, ServiceError};
pub use simulation::{Action, SimulationConfig, SimulationScheduler, SimulationStats};
