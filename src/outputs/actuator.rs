use std::fmt;
use std::sync::{Arc, Mutex};
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::error::ActuatorError;

/// Single-byte command understood by the head controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActuatorCommand {
    Neutral,
    Happy,
    Sad,
    Angry,
    LookRight,
    LookLeft,
    LookMiddle,
}

impl ActuatorCommand {
    pub fn code(&self) -> u8 {
        match self {
            ActuatorCommand::Neutral => b'N',
            ActuatorCommand::Happy => b'H',
            ActuatorCommand::Sad => b'S',
            ActuatorCommand::Angry => b'A',
            ActuatorCommand::LookRight => b'R',
            ActuatorCommand::LookLeft => b'L',
            ActuatorCommand::LookMiddle => b'M',
        }
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code() as char)
    }
}

/// Transport to the head. Implementations may fail; callers never treat that as fatal.
pub trait ActuatorSink: Send {
    fn send(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError>;

    /// Release the underlying connection.
    fn close(&mut self) {}
}

/// Logs commands instead of moving anything.
#[derive(Debug, Default)]
pub struct LogActuator;

impl ActuatorSink for LogActuator {
    fn send(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        info!("[ACTUATOR] {}", command);
        Ok(())
    }
}

/// Keeps every command in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    sent: Arc<Mutex<Vec<ActuatorCommand>>>,
    closed: Arc<Mutex<bool>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<ActuatorCommand> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.lock().map(|c| *c).unwrap_or(false)
    }
}

impl ActuatorSink for RecordingActuator {
    fn send(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| ActuatorError::Unavailable("recording log poisoned".to_string()))?;
        sent.push(command);
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut closed) = self.closed.lock() {
            *closed = true;
        }
    }
}

/// What happened to one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    Sent,
    /// No sink configured.
    NoSink,
    /// The sink rejected the write.
    Failed,
}

/// Wraps an optional sink. A missing or failing sink drops commands; the
/// engine keeps running either way.
pub struct ActuatorDriver {
    sink: Option<Box<dyn ActuatorSink>>,
}

impl ActuatorDriver {
    pub fn new(sink: Box<dyn ActuatorSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Driver for when the actuator could not be reached at startup.
    pub fn unavailable() -> Self {
        Self { sink: None }
    }

    pub fn dispatch(&mut self, command: ActuatorCommand) -> Delivery {
        let Some(sink) = self.sink.as_mut() else {
            debug!("No actuator connected, dropped {}", command);
            return Delivery::NoSink;
        };

        match sink.send(command) {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                warn!("Actuator write failed, dropped {}: {}", command, e);
                Delivery::Failed
            }
        }
    }

    /// Close and forget the sink. Later commands are dropped.
    pub fn release(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            sink.close();
            info!("Actuator released");
        }
    }
}

impl Drop for ActuatorDriver {
    fn drop(&mut self) {
        self.release();
    }
}
