//! # Hub Ingress Subsystem
//!
//! Validates inbound hub traffic and dispatches accepted requests.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** the validation pipeline and its rejection reasons
//! - **Ports Layer:** `IngressApi` (driving) and `RequestHandler` (driven)
//! - **Service Layer:** `IngressService` and the tag `Dispatcher`
//! - **Adapters Layer:** the broker subscription loop
//!
//! ## Outcomes
//!
//! | Inbound traffic | Outward action |
//! |-----------------|----------------|
//! | rejected by the validator | one `UnknownMessageError` on `/error` |
//! | accepted, handler refuses body | one `UnknownMessageError` on `/error` |
//! | accepted, handler bound | the handler's responses |
//! | accepted, no handler bound | nothing; logged as not implemented |
//!
//! ## Example
//!
//! ```rust,ignore
//! use gc_01_ingress::{Dispatcher, IngressApi, IngressService};
//! use shared_bus::InMemoryBroker;
//! use shared_types::SensorPeriod;
//!
//! let broker = InMemoryBroker::new();
//! let service = IngressService::new(
//!     broker.client(),
//!     Dispatcher::with_builtin_handlers(SensorPeriod::default()),
//! );
//! let outcome = service.handle("/network", b"not-json").await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod ports;
pub mod service;

pub use adapters::BusIngressAdapter;
pub use domain::{validate, HandlerError, InboundRequest, RejectionReason};
pub use ports::{IngressApi, RequestHandler};
pub use service::{DispatchOutcome, Dispatcher, IngressOutcome, IngressService, IngressStats};
