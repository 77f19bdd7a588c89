pub mod time;
pub mod event;
pub mod intent;
pub mod emotion;
pub mod mode;
pub mod gate;
pub mod reactor;
pub mod telemetry;
