use serde::{Serialize, Deserialize};
use crate::kernel::emotion::GroupedState;
use crate::kernel::intent::Intent;
use crate::kernel::mode::Mode;
use crate::outputs::actuator::{ActuatorCommand, Delivery};

// Allowed: Enums, Scores, Counts, Durations
// Forbidden: Utterance text, raw frames

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    IntentResolved {
        intent: Intent,
        score: f64,
    },

    /// NoMatch: best score stayed under the safety threshold (None = no tokens).
    IntentRejected {
        best_score: Option<f64>,
    },

    ModeTransition {
        from: Mode,
        to: Mode,
    },

    StableStateTransition {
        from: Option<GroupedState>,
        to: GroupedState,
        forwarded: bool,
    },

    ActuatorCommand {
        command: ActuatorCommand,
        delivery: Delivery,
    },

    SessionSummary {
        duration_secs: f64,
        intents_resolved: u64,
        intents_rejected: u64,
        stable_transitions: u64,
        commands_sent: u64,
        commands_dropped: u64,
    },
}
