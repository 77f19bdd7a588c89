pub mod actuator;
#[cfg(feature = "serial")]
pub mod serial;

pub use actuator::{ActuatorCommand, ActuatorDriver, ActuatorSink, Delivery, LogActuator, RecordingActuator};
