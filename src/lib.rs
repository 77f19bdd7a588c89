pub mod audio;
pub mod config;
pub mod console;
pub mod error;
pub mod kernel;
pub mod outputs;
pub mod vision;

// Re-export specific items for convenient access
pub use config::EngineConfig;
pub use kernel::reactor::Reactor;
