//! # Driven Ports (Outbound SPI)
//!
//! Business logic plugged into the dispatcher, one implementation per
//! request tag.

use shared_types::{Envelope, MessageTag};

use crate::domain::{HandlerError, InboundRequest};

/// Handles one kind of accepted request.
///
/// Handlers are synchronous and pure with respect to I/O: they return the
/// envelopes to publish and let the caller talk to the transport.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the dispatcher is shared with the
/// bus adapter task.
pub trait RequestHandler: Send + Sync {
    /// The tag this handler is bound to.
    fn tag(&self) -> MessageTag;

    /// Produce the response envelopes for `request`.
    fn handle(&self, request: &InboundRequest) -> Result<Vec<Envelope>, HandlerError>;
}
