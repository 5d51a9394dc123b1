//! # Ingress Service
//!
//! Wires the validator and dispatcher to the transport: rejected traffic and
//! refused requests answer with `UnknownMessageError` on `/error`, handled
//! requests answer with their responses, unbound tags answer with nothing
//! and are reported to the operator instead.

mod core;
mod dispatcher;
mod stats;

pub use self::core::{IngressOutcome, IngressService};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use stats::IngressStats;
