//! Decision telemetry
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside decision logic (Resolver, Stabilizer, Gate).
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain what the user said.
//! Only intents, states, scores and counts are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;
