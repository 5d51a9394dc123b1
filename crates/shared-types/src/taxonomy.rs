//! # Topic/Tag Taxonomy
//!
//! The closed sets of topics and tags that partition the hub-cloud message
//! space, plus cheap membership tests used as guards by the ingress pipeline.
//!
//! Tags are unique across the whole protocol, not just within a topic, so a
//! receiver can identify a message from its tag alone.

use serde_json::Value;
use std::fmt;

/// Kind of a message on the wire (`mtype`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Request action, expects exactly one response.
    Request = 0x00,
    /// Response to a request.
    Response = 0x01,
    /// Fire-and-forget, can be used as an acknowledgment.
    Signal = 0x02,
}

impl MessageKind {
    /// Wire value of this kind.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire value.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Request),
            0x01 => Some(Self::Response),
            0x02 => Some(Self::Signal),
            _ => None,
        }
    }
}

/// Logical publish/subscribe channel.
///
/// The topic is routing metadata only and never appears in a serialized
/// envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    /// Configuration of the cubes.
    Config,
    /// Measurements related info.
    Measurements,
    /// Updates from cubes.
    CubeState,
    /// Network updates.
    Network,
    /// Errors.
    Error,
}

impl Topic {
    /// All topics, in wire order.
    pub const ALL: [Topic; 5] = [
        Topic::Config,
        Topic::Measurements,
        Topic::CubeState,
        Topic::Network,
        Topic::Error,
    ];

    /// Wire-level channel name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "/config",
            Self::Measurements => "/measurement",
            Self::CubeState => "/cube",
            Self::Network => "/network",
            Self::Error => "/error",
        }
    }

    /// Resolve a wire-level channel name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "/config" => Some(Self::Config),
            "/measurement" => Some(Self::Measurements),
            "/cube" => Some(Self::CubeState),
            "/network" => Some(Self::Network),
            "/error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Globally unique message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MessageTag {
    /// A new cube joined the network.
    CubeJoined = 0x01,
    /// A cube left the network.
    CubeDisconnected = 0x02,
    /// Periodic sensor readings.
    SensorData = 0x03,
    /// Request to change the sensor data period.
    SensorDataPeriodReq = 0x04,
    /// Response to [`MessageTag::SensorDataPeriodReq`].
    SensorDataPeriodRes = 0x05,
    /// A cube was flipped to another side.
    CubeFlipped = 0x06,
    /// Configuration of the side currently facing up.
    CubeSideConfig = 0x07,
    /// Request to update a side configuration.
    CubeUpdateConfigReq = 0x08,
    /// Response to [`MessageTag::CubeUpdateConfigReq`].
    CubeUpdateConfigRes = 0x09,
    /// Cube hardware fault.
    CubeHardwareError = 0x0A,
    /// Hub hardware fault.
    HubHardwareError = 0x0B,
    /// Inbound message could not be interpreted.
    UnknownMessageError = 0x0C,
}

impl MessageTag {
    /// Every tag in the protocol.
    pub const ALL: [MessageTag; 12] = [
        MessageTag::CubeJoined,
        MessageTag::CubeDisconnected,
        MessageTag::SensorData,
        MessageTag::SensorDataPeriodReq,
        MessageTag::SensorDataPeriodRes,
        MessageTag::CubeFlipped,
        MessageTag::CubeSideConfig,
        MessageTag::CubeUpdateConfigReq,
        MessageTag::CubeUpdateConfigRes,
        MessageTag::CubeHardwareError,
        MessageTag::HubHardwareError,
        MessageTag::UnknownMessageError,
    ];

    /// Wire value of this tag.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire value.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::CubeJoined),
            0x02 => Some(Self::CubeDisconnected),
            0x03 => Some(Self::SensorData),
            0x04 => Some(Self::SensorDataPeriodReq),
            0x05 => Some(Self::SensorDataPeriodRes),
            0x06 => Some(Self::CubeFlipped),
            0x07 => Some(Self::CubeSideConfig),
            0x08 => Some(Self::CubeUpdateConfigReq),
            0x09 => Some(Self::CubeUpdateConfigRes),
            0x0A => Some(Self::CubeHardwareError),
            0x0B => Some(Self::HubHardwareError),
            0x0C => Some(Self::UnknownMessageError),
            _ => None,
        }
    }

    /// Decode a tag from an arbitrary JSON value.
    ///
    /// Anything that is not an integer in the tag range yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw = value.as_u64()?;
        u8::try_from(raw).ok().and_then(Self::from_u8)
    }

    /// The kind every message with this tag carries.
    #[must_use]
    pub const fn expected_kind(self) -> MessageKind {
        match self {
            Self::SensorDataPeriodReq | Self::CubeUpdateConfigReq => MessageKind::Request,
            Self::SensorDataPeriodRes | Self::CubeUpdateConfigRes => MessageKind::Response,
            _ => MessageKind::Signal,
        }
    }

    /// The topic every message with this tag travels on.
    #[must_use]
    pub const fn topic(self) -> Topic {
        match self {
            Self::CubeJoined | Self::CubeDisconnected => Topic::Network,
            Self::SensorData | Self::SensorDataPeriodReq | Self::SensorDataPeriodRes => {
                Topic::Measurements
            }
            Self::CubeFlipped => Topic::CubeState,
            Self::CubeSideConfig | Self::CubeUpdateConfigReq | Self::CubeUpdateConfigRes => {
                Topic::Config
            }
            Self::CubeHardwareError | Self::HubHardwareError | Self::UnknownMessageError => {
                Topic::Error
            }
        }
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:02X})", self, self.as_u8())
    }
}

/// Whether `name` is one of the wire-level topic names.
#[must_use]
pub fn is_valid_topic(name: &str) -> bool {
    Topic::from_name(name).is_some()
}

/// Whether `value` is a recognized tag.
///
/// Wrong types and out-of-range integers are simply not members.
#[must_use]
pub fn is_valid_tag(value: &Value) -> bool {
    MessageTag::from_value(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_topic_names_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_name(topic.as_str()), Some(topic));
        }
    }

    #[test]
    fn test_unknown_topics_are_not_members() {
        assert!(!is_valid_topic("/bogus"));
        assert!(!is_valid_topic("network"));
        assert!(!is_valid_topic(""));
        assert!(is_valid_topic("/network"));
    }

    #[test]
    fn test_tags_are_pairwise_distinct() {
        let values: HashSet<u8> = MessageTag::ALL.iter().map(|t| t.as_u8()).collect();
        assert_eq!(values.len(), MessageTag::ALL.len());
    }

    #[test]
    fn test_tag_membership_tolerates_garbage() {
        assert!(is_valid_tag(&json!(1)));
        assert!(is_valid_tag(&json!(0x0C)));
        assert!(!is_valid_tag(&json!(0)));
        assert!(!is_valid_tag(&json!(0x0D)));
        assert!(!is_valid_tag(&json!(257)));
        assert!(!is_valid_tag(&json!(-1)));
        assert!(!is_valid_tag(&json!(1.5)));
        assert!(!is_valid_tag(&json!("1")));
        assert!(!is_valid_tag(&json!(null)));
        assert!(!is_valid_tag(&json!([1])));
    }

    #[test]
    fn test_request_tags_travel_with_their_responses() {
        assert_eq!(
            MessageTag::SensorDataPeriodReq.topic(),
            MessageTag::SensorDataPeriodRes.topic()
        );
        assert_eq!(
            MessageTag::CubeUpdateConfigReq.topic(),
            MessageTag::CubeUpdateConfigRes.topic()
        );
        assert_eq!(
            MessageTag::CubeUpdateConfigReq.expected_kind(),
            MessageKind::Request
        );
    }

    #[test]
    fn test_kind_wire_values() {
        assert_eq!(MessageKind::from_u8(0), Some(MessageKind::Request));
        assert_eq!(MessageKind::from_u8(2), Some(MessageKind::Signal));
        assert_eq!(MessageKind::from_u8(3), None);
    }
}
