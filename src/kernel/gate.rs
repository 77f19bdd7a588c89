use tracing::info;

use crate::kernel::emotion::{GroupedState, StateTransition};
use crate::kernel::intent::Intent;
use crate::kernel::mode::{Mode, ModeGraph};
use crate::outputs::actuator::ActuatorCommand;

/// Outcome of feeding one intent through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub from: Mode,
    pub to: Mode,
    pub command: Option<ActuatorCommand>,
}

impl GateDecision {
    pub fn mode_changed(&self) -> bool {
        self.from != self.to
    }
}

/// Holds the single Mode value and turns intents and stable-state
/// transitions into actuator commands.
#[derive(Debug, Default)]
pub struct ActuatorGate {
    mode: Mode,
}

impl ActuatorGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn on_intent(&mut self, intent: Intent) -> GateDecision {
        let from = self.mode;
        let to = ModeGraph::next(from, intent);
        self.mode = to;

        let command = match intent {
            Intent::Stop => Some(ActuatorCommand::Neutral),
            Intent::Imitate => None, // mode switch only
            Intent::Happy => Some(ActuatorCommand::Happy),
            Intent::Sad => Some(ActuatorCommand::Sad),
            Intent::Angry => Some(ActuatorCommand::Angry),
            Intent::LookRight => Some(ActuatorCommand::LookRight),
            Intent::LookLeft => Some(ActuatorCommand::LookLeft),
            Intent::LookMiddle => Some(ActuatorCommand::LookMiddle),
        };

        info!(">>> ACTION: {} (mode {:?} -> {:?})", intent, from, to);
        GateDecision { from, to, command }
    }

    /// Forward a stable-state change only while imitating; drop it otherwise.
    pub fn on_transition(&self, transition: &StateTransition) -> Option<ActuatorCommand> {
        match self.mode {
            Mode::Imitate => Some(Self::command_for(transition.to)),
            Mode::Idle => None,
        }
    }

    pub fn command_for(state: GroupedState) -> ActuatorCommand {
        match state {
            GroupedState::Happy => ActuatorCommand::Happy,
            GroupedState::Sad => ActuatorCommand::Sad,
            GroupedState::Angry => ActuatorCommand::Angry,
        }
    }
}
