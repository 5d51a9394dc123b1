//! # Cube Network Service
//!
//! Shares one network between concurrent callers and turns each event into
//! outbound envelopes:
//!
//! | Event | Envelopes |
//! |-------|-----------|
//! | join | `CubeJoined`, `SideConfig` |
//! | exit | `CubeDisconnected` |
//! | flip | `CubeFlipped`, `SideConfig` |
//! | measure | `SensorData` |

mod core;
pub mod events;

pub use self::core::{CubeNetworkService, ServiceError};
