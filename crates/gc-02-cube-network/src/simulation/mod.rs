//! # Simulation
//!
//! Timed traffic generation over the cube network.

mod config;
mod scheduler;

pub use config::SimulationConfig;
pub use scheduler::{Action, SimulationScheduler, SimulationStats};
