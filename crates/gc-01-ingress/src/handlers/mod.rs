//! # Built-in Request Handlers
//!
//! Only the two documented request shapes have business logic. Every other
//! tag is left unbound and dispatches as not implemented.

mod config_update;
mod sensor_period;

pub use config_update::{ConfigUpdateHandler, CUBE_ID_FIELD};
pub use sensor_period::{SensorPeriodHandler, PERIOD_FIELD};
