use serde::{Serialize, Deserialize};

use crate::kernel::intent::Intent;

/// Operating mode of the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Only explicit voice intents move the actuator.
    #[default]
    Idle,
    /// Stable emotional state drives the actuator.
    Imitate,
}

/// Mode transitions driven by resolved intents.
pub struct ModeGraph;

impl ModeGraph {
    /// Pure function: (Current Mode, Intent) -> Next Mode
    ///
    /// Forced emotions and look commands are one-shot overrides, so they cancel
    /// imitation just like STOP does.
    pub fn next(_current: Mode, intent: Intent) -> Mode {
        match intent {
            Intent::Imitate => Mode::Imitate,
            Intent::Stop
            | Intent::Happy
            | Intent::Sad
            | Intent::Angry
            | Intent::LookRight
            | Intent::LookLeft
            | Intent::LookMiddle => Mode::Idle,
        }
    }
}
