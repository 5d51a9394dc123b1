use serde_json::{Map, Value};
use shared_types::{MessageTag, Topic};

/// An inbound message that passed validation.
///
/// Always a REQUEST with a recognized tag, received on a hub topic.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundRequest {
    topic: Topic,
    tag: MessageTag,
    record: Map<String, Value>,
}

impl InboundRequest {
    pub(crate) fn new(topic: Topic, tag: MessageTag, record: Map<String, Value>) -> Self {
        Self { topic, tag, record }
    }

    /// Channel the request arrived on.
    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Request tag.
    #[must_use]
    pub fn tag(&self) -> MessageTag {
        self.tag
    }

    /// Full decoded record, header fields included.
    #[must_use]
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Look up a single field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }
}
