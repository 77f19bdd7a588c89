use std::io::Write;
use std::time::Duration;
use serialport::SerialPort;
use tracing::info;

use super::actuator::{ActuatorCommand, ActuatorSink};
use crate::error::ActuatorError;

/// Head controller on a serial line, one byte per command.
pub struct SerialActuator {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialActuator {
    /// Open the port and wait `settle` for the controller to reset
    /// (boards reboot when the port opens).
    pub fn open(name: &str, baud_rate: u32, settle: Duration) -> Result<Self, ActuatorError> {
        let port = serialport::new(name, baud_rate)
            .timeout(Duration::from_secs(1))
            .open()?;
        std::thread::sleep(settle);
        info!("Actuator connected on {} @ {} baud", name, baud_rate);
        Ok(Self { port, name: name.to_string() })
    }
}

impl ActuatorSink for SerialActuator {
    fn send(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        self.port.write_all(&[command.code()])?;
        self.port.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let _ = self.port.flush();
        info!("Closing actuator port {}", self.name);
    }
}
