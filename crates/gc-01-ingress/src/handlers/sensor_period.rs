//! Sensor data period requests.
//!
//! Inbound shape: `{ "mtype": 0, "tag": 4, "period": <milliseconds> }`.

use shared_types::{Envelope, MessageTag, SensorPeriod};
use tracing::info;

use crate::domain::{HandlerError, InboundRequest};
use crate::ports::RequestHandler;

/// Wire key of the requested period.
pub const PERIOD_FIELD: &str = "period";

/// Stores a new sensor period and acknowledges it.
pub struct SensorPeriodHandler {
    period: SensorPeriod,
}

impl SensorPeriodHandler {
    /// Bind the handler to a shared period handle.
    pub fn new(period: SensorPeriod) -> Self {
        Self { period }
    }
}

impl RequestHandler for SensorPeriodHandler {
    fn tag(&self) -> MessageTag {
        MessageTag::SensorDataPeriodReq
    }

    fn handle(&self, request: &InboundRequest) -> Result<Vec<Envelope>, HandlerError> {
        let value = request
            .field(PERIOD_FIELD)
            .ok_or(HandlerError::MissingField(PERIOD_FIELD))?;

        let period_ms = value
            .as_u64()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| HandlerError::InvalidField {
                field: PERIOD_FIELD,
                reason: format!("expected a positive integer, got {value}"),
            })?;

        let previous = self.period.get_ms();
        self.period.set_ms(period_ms);
        info!(previous_ms = previous, period_ms, "Sensor period updated");

        Ok(vec![Envelope::sensor_period_response()])
    }
}
