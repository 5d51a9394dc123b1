//! # Adapters Layer
//!
//! Connects the ingress service to the broker.

pub mod bus;

pub use bus::BusIngressAdapter;
