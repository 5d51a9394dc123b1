//! # Domain Layer
//!
//! Cubes, the network that owns them, and its errors. Pure in-memory logic.

pub mod cube;
pub mod errors;
pub mod network;

pub use cube::{Cube, Flip};
pub use errors::NetworkError;
pub use network::{CubeNetwork, Reading};
