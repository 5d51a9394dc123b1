//! Domain Errors for Ingress

use thiserror::Error;

/// Why an inbound message was refused.
///
/// All reasons collapse to the same outward `UnknownMessageError` signal.
/// The detail carried here is for operator logs only and never reaches the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// Message arrived on a channel outside the hub taxonomy.
    #[error("unexpected topic {0:?}")]
    UnexpectedTopic(String),

    /// Payload is not a flat key-value record.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A mandatory header field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Unknown tag, or a kind other than REQUEST.
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),
}

impl RejectionReason {
    /// Short label without the diagnostic detail.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnexpectedTopic(_) => "UnexpectedTopic",
            Self::MalformedPayload(_) => "MalformedPayload",
            Self::MissingField(_) => "MissingField",
            Self::UnexpectedMessage(_) => "UnexpectedMessage",
        }
    }
}

/// A request handler could not make sense of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Field required by this request is absent.
    #[error("request is missing field `{0}`")]
    MissingField(&'static str),

    /// Field is present but unusable.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}
