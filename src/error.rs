//! Error types for mimic

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Actuator transport errors. None of these are fatal to the engine;
/// the driver drops the command and keeps going.
#[derive(Error, Debug)]
pub enum ActuatorError {
    #[error("Actuator unavailable: {0}")]
    Unavailable(String),

    #[error("Actuator IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serial")]
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

/// Producer-side failures. The engine treats every one of them as
/// "nothing happened this cycle".
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Speech was not intelligible")]
    Unintelligible,

    #[error("Recognition service unreachable: {0}")]
    Unreachable(String),

    #[error("Capture device error: {0}")]
    Device(String),
}

/// A classifier label outside the known set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Unknown emotion label '{0}'")]
    Unknown(String),
}
