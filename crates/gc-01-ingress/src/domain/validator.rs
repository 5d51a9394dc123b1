//! # Ingress Validator
//!
//! Classifies raw inbound traffic. The pipeline short-circuits at the first
//! failing stage, always in this order:
//!
//! 1. topic membership
//! 2. payload parse
//! 3. presence of `tag` and `mtype`
//! 4. known tag and `mtype == REQUEST`
//!
//! Pure function of its inputs; no I/O, no shared state.

use serde_json::{Map, Value};
use shared_types::{MessageKind, MessageTag, Topic};

use super::errors::RejectionReason;
use super::request::InboundRequest;

/// Wire key of the message kind.
pub const KIND_FIELD: &str = "mtype";
/// Wire key of the message tag.
pub const TAG_FIELD: &str = "tag";

/// Validate one inbound delivery.
pub fn validate(topic: &str, raw: &[u8]) -> Result<InboundRequest, RejectionReason> {
    let topic =
        Topic::from_name(topic).ok_or_else(|| RejectionReason::UnexpectedTopic(topic.to_owned()))?;

    let record = parse_record(raw)?;

    let tag_value = record
        .get(TAG_FIELD)
        .ok_or(RejectionReason::MissingField(TAG_FIELD))?;
    let kind_value = record
        .get(KIND_FIELD)
        .ok_or(RejectionReason::MissingField(KIND_FIELD))?;

    let tag = MessageTag::from_value(tag_value)
        .ok_or_else(|| RejectionReason::UnexpectedMessage(format!("unknown tag {tag_value}")))?;

    if !is_request(kind_value) {
        return Err(RejectionReason::UnexpectedMessage(format!(
            "inbound {tag} with mtype {kind_value}, only REQUEST is accepted"
        )));
    }

    Ok(InboundRequest::new(topic, tag, record))
}

fn parse_record(raw: &[u8]) -> Result<Map<String, Value>, RejectionReason> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(RejectionReason::MalformedPayload(format!(
            "expected a record, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(RejectionReason::MalformedPayload(e.to_string())),
    }
}

fn is_request(kind: &Value) -> bool {
    kind.as_u64()
        .and_then(|k| u8::try_from(k).ok())
        .and_then(MessageKind::from_u8)
        == Some(MessageKind::Request)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "record",
    }
}
