//! # Ports Layer
//!
//! Trait definitions at the edges of the ingress subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::IngressApi;
pub use outbound::RequestHandler;
