//! Cube side configuration updates.
//!
//! Inbound shape: `{ "mtype": 0, "tag": 8, "cube_id": <address> }`.

use shared_types::{CubeId, Envelope, MessageTag};
use tracing::debug;

use crate::domain::{HandlerError, InboundRequest};
use crate::ports::RequestHandler;

/// Wire key of the target cube.
pub const CUBE_ID_FIELD: &str = "cube_id";

/// Acknowledges configuration updates for a cube.
#[derive(Default)]
pub struct ConfigUpdateHandler;

impl ConfigUpdateHandler {
    pub fn new() -> Self {
        Self
    }
}

impl RequestHandler for ConfigUpdateHandler {
    fn tag(&self) -> MessageTag {
        MessageTag::CubeUpdateConfigReq
    }

    fn handle(&self, request: &InboundRequest) -> Result<Vec<Envelope>, HandlerError> {
        let value = request
            .field(CUBE_ID_FIELD)
            .ok_or(HandlerError::MissingField(CUBE_ID_FIELD))?;

        let cube_id = value
            .as_u64()
            .and_then(|raw| u8::try_from(raw).ok())
            .and_then(|raw| CubeId::new(raw).ok())
            .ok_or_else(|| HandlerError::InvalidField {
                field: CUBE_ID_FIELD,
                reason: format!("expected an address in 0x01..=0xFE, got {value}"),
            })?;

        debug!(cube_id = %cube_id, "Config update acknowledged");
        Ok(vec![Envelope::config_update_response(cube_id)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate;
    use shared_types::Topic;

    fn request(raw: &str) -> InboundRequest {
        validate("/config", raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_response_echoes_cube_id() {
        let responses = ConfigUpdateHandler::new()
            .handle(&request(r#"{"mtype":0,"tag":8,"cube_id":17}"#))
            .unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].tag(), MessageTag::CubeUpdateConfigRes);
        assert_eq!(responses[0].topic(), Topic::Config);
        assert_eq!(responses[0].to_wire().unwrap()["cube_id"], 17);
    }

    #[test]
    fn test_reserved_addresses_invalid() {
        for bad in ["0", "255", "300", "\"a\""] {
            let raw = format!(r#"{{"mtype":0,"tag":8,"cube_id":{bad}}}"#);
            assert!(matches!(
                ConfigUpdateHandler::new().handle(&request(&raw)),
                Err(HandlerError::InvalidField { field: "cube_id", .. })
            ));
        }
    }

    #[test]
    fn test_missing_cube_id() {
        assert_eq!(
            ConfigUpdateHandler::new().handle(&request(r#"{"mtype":0,"tag":8}"#)),
            Err(HandlerError::MissingField(CUBE_ID_FIELD))
        );
    }
}
