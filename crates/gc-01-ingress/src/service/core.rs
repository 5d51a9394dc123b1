use async_trait::async_trait;
use shared_bus::{Transport, TransportError};
use shared_types::Envelope;
use tracing::{debug, warn};

use super::dispatcher::{DispatchOutcome, Dispatcher};
use super::stats::{Counters, IngressStats};
use crate::domain::{validate, HandlerError, RejectionReason};
use crate::ports::IngressApi;

/// What happened to one inbound delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum IngressOutcome {
    /// Refused by the validator. An `UnknownMessageError` was published.
    Rejected(RejectionReason),
    /// Accepted and dispatched.
    Dispatched(DispatchOutcome),
    /// Accepted, but the handler refused the request body. An
    /// `UnknownMessageError` was published.
    HandlerFailed(HandlerError),
}

/// Ingress service implementing the driving port.
///
/// Owns the transport handle used for replies and the dispatcher. Each call
/// to [`IngressService::handle`] runs validation and dispatch to completion
/// before returning.
pub struct IngressService<T> {
    transport: T,
    dispatcher: Dispatcher,
    counters: Counters,
}

impl<T: Transport> IngressService<T> {
    /// Create a service replying through `transport`.
    pub fn new(transport: T, dispatcher: Dispatcher) -> Self {
        Self {
            transport,
            dispatcher,
            counters: Counters::default(),
        }
    }

    /// The dispatcher in use.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The transport replies go out on.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn process(&self, topic: &str, raw: &[u8]) -> Result<IngressOutcome, TransportError> {
        Counters::bump(&self.counters.received);

        let request = match validate(topic, raw) {
            Ok(request) => request,
            Err(reason) => {
                warn!(topic, reason = %reason, kind = reason.label(), "Inbound message rejected");
                Counters::bump(&self.counters.rejected);
                self.reply(&Envelope::unknown_message_error()).await?;
                return Ok(IngressOutcome::Rejected(reason));
            }
        };

        Counters::bump(&self.counters.accepted);
        debug!(topic, tag = %request.tag(), "Inbound request accepted");

        match self.dispatcher.dispatch(&request) {
            Ok(DispatchOutcome::Handled(responses)) => {
                for response in &responses {
                    self.reply(response).await?;
                }
                Ok(IngressOutcome::Dispatched(DispatchOutcome::Handled(responses)))
            }
            Ok(DispatchOutcome::NotImplemented(tag)) => {
                warn!(topic, tag = %tag, "No handler bound for valid request tag");
                Counters::bump(&self.counters.not_implemented);
                Ok(IngressOutcome::Dispatched(DispatchOutcome::NotImplemented(tag)))
            }
            Err(error) => {
                warn!(topic, tag = %request.tag(), error = %error, "Request handler refused message");
                Counters::bump(&self.counters.handler_failures);
                self.reply(&Envelope::unknown_message_error()).await?;
                Ok(IngressOutcome::HandlerFailed(error))
            }
        }
    }

    async fn reply(&self, envelope: &Envelope) -> Result<(), TransportError> {
        self.transport.publish_envelope(envelope).await?;
        Counters::bump(&self.counters.published);
        debug!(topic = %envelope.topic(), tag = %envelope.tag(), "Reply published");
        Ok(())
    }
}

#[async_trait]
impl<T: Transport> IngressApi for IngressService<T> {
    async fn handle(&self, topic: &str, raw: &[u8]) -> Result<IngressOutcome, TransportError> {
        self.process(topic, raw).await
    }

    fn stats(&self) -> IngressStats {
        self.counters.snapshot()
    }
}
