//! # Domain Layer
//!
//! Pure validation logic and the types it produces.

pub mod errors;
mod request;
pub mod validator;

pub use errors::{HandlerError, RejectionReason};
pub use request::InboundRequest;
pub use validator::{validate, KIND_FIELD, TAG_FIELD};
