use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{Envelope, MessageTag, SensorPeriod};
use tracing::debug;

use crate::domain::{HandlerError, InboundRequest};
use crate::handlers::{ConfigUpdateHandler, SensorPeriodHandler};
use crate::ports::RequestHandler;

/// Result of dispatching an accepted request.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// A handler ran and produced these envelopes.
    Handled(Vec<Envelope>),
    /// Valid tag with no handler bound. A configuration gap, not a
    /// protocol error.
    NotImplemented(MessageTag),
}

/// Routes accepted requests to the handler bound to their tag.
#[derive(Default, Clone)]
pub struct Dispatcher {
    handlers: HashMap<MessageTag, Arc<dyn RequestHandler>>,
}

impl Dispatcher {
    /// Dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with the built-in period and config handlers.
    pub fn with_builtin_handlers(period: SensorPeriod) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Arc::new(SensorPeriodHandler::new(period)));
        dispatcher.register(Arc::new(ConfigUpdateHandler::new()));
        dispatcher
    }

    /// Bind a handler to its tag, returning the one it replaces.
    pub fn register(
        &mut self,
        handler: Arc<dyn RequestHandler>,
    ) -> Option<Arc<dyn RequestHandler>> {
        let tag = handler.tag();
        debug!(tag = %tag, "Request handler registered");
        self.handlers.insert(tag, handler)
    }

    /// Whether `tag` has a handler.
    pub fn is_registered(&self, tag: MessageTag) -> bool {
        self.handlers.contains_key(&tag)
    }

    /// Tags with a bound handler, in ascending order.
    pub fn registered_tags(&self) -> Vec<MessageTag> {
        let mut tags: Vec<MessageTag> = self.handlers.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Run the handler bound to the request's tag.
    pub fn dispatch(&self, request: &InboundRequest) -> Result<DispatchOutcome, HandlerError> {
        match self.handlers.get(&request.tag()) {
            Some(handler) => handler.handle(request).map(DispatchOutcome::Handled),
            None => Ok(DispatchOutcome::NotImplemented(request.tag())),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.registered_tags())
            .finish()
    }
}
