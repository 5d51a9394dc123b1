//! # Message Envelope
//!
//! The canonical unit of hub-cloud communication.
//!
//! ## Wire Properties
//!
//! - **Common header**: every envelope carries `mtype`, `tag` and `timestamp`.
//! - **Fixed identity**: the `(kind, topic, tag)` triple is derived from the
//!   payload variant and cannot be changed after construction.
//! - **Routing-only topic**: the topic is never part of the serialized form.
//!
//! Envelopes are immutable. A new flip or a new reading is always a new
//! envelope, never a mutation of one already sent.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::entities::{unix_now, CubeId, Side, SideColor};
use crate::errors::EnvelopeError;
use crate::taxonomy::{MessageKind, MessageTag, Topic};

/// Variant-specific fields of an envelope.
///
/// Field names are the wire keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// A new cube joined the network.
    CubeJoined { cube_id: CubeId },
    /// A cube left the network.
    CubeDisconnected { cube_id: CubeId },
    /// Sensor readings (degrees Celsius, relative humidity percent).
    SensorData { temp: i16, humid: u8 },
    /// Acknowledges a sensor period change.
    SensorPeriodResponse {},
    /// A cube was flipped from `old_side` to `new_side`.
    CubeFlipped {
        cube_id: CubeId,
        old_side: Side,
        new_side: Side,
    },
    /// Configuration of the side currently facing up.
    SideConfig {
        cube_id: CubeId,
        side_idx: Side,
        color: SideColor,
    },
    /// Acknowledges a side configuration update.
    ConfigUpdateResponse { cube_id: CubeId },
    /// Cube hardware fault.
    CubeHardwareError { cube_id: CubeId },
    /// Hub hardware fault.
    HubHardwareError { cube_id: CubeId },
    /// The universal "could not interpret your message" signal.
    UnknownMessageError {},
}

impl Payload {
    /// The tag this payload is bound to.
    #[must_use]
    pub const fn tag(&self) -> MessageTag {
        match self {
            Self::CubeJoined { .. } => MessageTag::CubeJoined,
            Self::CubeDisconnected { .. } => MessageTag::CubeDisconnected,
            Self::SensorData { .. } => MessageTag::SensorData,
            Self::SensorPeriodResponse {} => MessageTag::SensorDataPeriodRes,
            Self::CubeFlipped { .. } => MessageTag::CubeFlipped,
            Self::SideConfig { .. } => MessageTag::CubeSideConfig,
            Self::ConfigUpdateResponse { .. } => MessageTag::CubeUpdateConfigRes,
            Self::CubeHardwareError { .. } => MessageTag::CubeHardwareError,
            Self::HubHardwareError { .. } => MessageTag::HubHardwareError,
            Self::UnknownMessageError {} => MessageTag::UnknownMessageError,
        }
    }
}

/// An outbound hub message.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Producer-side wall-clock time (UNIX seconds).
    timestamp: f64,
    /// Variant-specific fields.
    payload: Payload,
}

impl Envelope {
    fn new(payload: Payload) -> Self {
        Self {
            timestamp: unix_now(),
            payload,
        }
    }

    /// Signal that a new cube joined the network.
    #[must_use]
    pub fn cube_joined(cube_id: CubeId) -> Self {
        Self::new(Payload::CubeJoined { cube_id })
    }

    /// Signal that a cube left the network.
    #[must_use]
    pub fn cube_disconnected(cube_id: CubeId) -> Self {
        Self::new(Payload::CubeDisconnected { cube_id })
    }

    /// Signal carrying sensor readings.
    #[must_use]
    pub fn sensor_data(temp: i16, humid: u8) -> Self {
        Self::new(Payload::SensorData { temp, humid })
    }

    /// Response to a sensor period request.
    ///
    /// The request arrives as `{ tag: 0x04, period: <new_period_ms> }`.
    #[must_use]
    pub fn sensor_period_response() -> Self {
        Self::new(Payload::SensorPeriodResponse {})
    }

    /// Signal that a cube was flipped from `old_side` to `new_side`.
    #[must_use]
    pub fn cube_flipped(cube_id: CubeId, old_side: Side, new_side: Side) -> Self {
        Self::new(Payload::CubeFlipped {
            cube_id,
            old_side,
            new_side,
        })
    }

    /// Signal carrying the configuration of a specific side.
    #[must_use]
    pub fn side_config(cube_id: CubeId, side_idx: Side, color: SideColor) -> Self {
        Self::new(Payload::SideConfig {
            cube_id,
            side_idx,
            color,
        })
    }

    /// Response to a side configuration update.
    #[must_use]
    pub fn config_update_response(cube_id: CubeId) -> Self {
        Self::new(Payload::ConfigUpdateResponse { cube_id })
    }

    /// Signal that a cube reported a hardware fault.
    #[must_use]
    pub fn cube_hardware_error(cube_id: CubeId) -> Self {
        Self::new(Payload::CubeHardwareError { cube_id })
    }

    /// Signal that the hub hit a hardware fault while serving `cube_id`.
    #[must_use]
    pub fn hub_hardware_error(cube_id: CubeId) -> Self {
        Self::new(Payload::HubHardwareError { cube_id })
    }

    /// Signal that an inbound message could not be interpreted.
    #[must_use]
    pub fn unknown_message_error() -> Self {
        Self::new(Payload::UnknownMessageError {})
    }

    /// Message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.tag().expected_kind()
    }

    /// Message tag.
    #[must_use]
    pub const fn tag(&self) -> MessageTag {
        self.payload.tag()
    }

    /// Routing topic. Not serialized.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        self.tag().topic()
    }

    /// Construction time in UNIX seconds.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Variant-specific fields.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Flat key-value record for transmission, without the topic.
    pub fn to_wire(&self) -> Result<Map<String, Value>, EnvelopeError> {
        let Value::Object(mut record) = serde_json::to_value(&self.payload)? else {
            return Err(EnvelopeError::NotARecord);
        };
        record.insert("mtype".to_owned(), Value::from(self.kind().as_u8()));
        record.insert("tag".to_owned(), Value::from(self.tag().as_u8()));
        record.insert("timestamp".to_owned(), Value::from(self.timestamp));
        Ok(record)
    }

    /// JSON bytes ready to publish.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        Ok(serde_json::to_vec(&Value::Object(self.to_wire()?))?)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.to_wire().map_err(|_| fmt::Error)?;
        write!(f, "{}", Value::Object(record))
    }
}
