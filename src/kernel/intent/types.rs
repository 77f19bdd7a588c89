use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::error::ConfigError;

/// Application-level command derived from a noisy utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Stop,
    Imitate,
    Happy,
    Sad,
    Angry,
    LookRight,
    LookLeft,
    LookMiddle,
}

impl Intent {
    /// Declaration order. The resolver walks intents in this order, which makes
    /// it part of the tie-break policy.
    pub const ALL: [Intent; 8] = [
        Intent::Stop,
        Intent::Imitate,
        Intent::Happy,
        Intent::Sad,
        Intent::Angry,
        Intent::LookRight,
        Intent::LookLeft,
        Intent::LookMiddle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Stop => "STOP",
            Intent::Imitate => "IMITATE",
            Intent::Happy => "HAPPY",
            Intent::Sad => "SAD",
            Intent::Angry => "ANGRY",
            Intent::LookRight => "LOOK_RIGHT",
            Intent::LookLeft => "LOOK_LEFT",
            Intent::LookMiddle => "LOOK_MIDDLE",
        }
    }

    fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Intent::Stop => &["stop", "quit", "pause", "terminate", "halt", "enough", "freeze"],
            Intent::Imitate => &["imitate", "mirror", "copy", "start", "mimic", "begin", "emulate"],
            Intent::Happy => &["happy", "happiness", "laughing", "excited", "smile", "joy"],
            Intent::Sad => &["sad", "sadness", "crying", "depressed", "unhappy", "sorrow"],
            Intent::Angry => &["angry", "anger", "furious", "rage", "mad", "mean"],
            Intent::LookRight => &["right", "east"],
            Intent::LookLeft => &["left", "west"],
            Intent::LookMiddle => &["middle", "center", "centre", "front", "forward"],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = ConfigError;

    /// Accepts "look_right", "LOOK_RIGHT", "look-right".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase().replace('-', "_");
        Intent::ALL
            .into_iter()
            .find(|i| i.name() == key)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown intent '{}'", s)))
    }
}

/// Intent -> ordered aliases. Built once, never mutated afterwards.
///
/// Entries are kept in `Intent::ALL` order regardless of how they were supplied,
/// so iteration order never depends on a hash map.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTable {
    entries: Vec<(Intent, Vec<String>)>,
}

impl CommandTable {
    /// Build a table from explicit entries. Every intent needs at least one
    /// non-empty alias; aliases are lowercased and trimmed.
    pub fn new(mut aliases: HashMap<Intent, Vec<String>>) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(Intent::ALL.len());

        for intent in Intent::ALL {
            let list = aliases.remove(&intent).unwrap_or_default();
            let list: Vec<String> = list
                .into_iter()
                .map(|a| a.trim().to_lowercase())
                .collect();

            if list.is_empty() {
                return Err(ConfigError::Invalid(format!("intent {} has no aliases", intent)));
            }
            if list.iter().any(|a| a.is_empty()) {
                return Err(ConfigError::Invalid(format!("intent {} has an empty alias", intent)));
            }
            entries.push((intent, list));
        }

        Ok(Self { entries })
    }

    /// Default table with a per-intent overlay: an intent present in `overrides`
    /// has its alias list replaced, the others keep the defaults.
    pub fn with_overrides(overrides: &HashMap<Intent, Vec<String>>) -> Result<Self, ConfigError> {
        let mut aliases: HashMap<Intent, Vec<String>> = Intent::ALL
            .iter()
            .map(|i| (*i, i.default_aliases().iter().map(|a| a.to_string()).collect()))
            .collect();

        for (intent, list) in overrides {
            aliases.insert(*intent, list.clone());
        }

        Self::new(aliases)
    }

    pub fn aliases(&self, intent: Intent) -> &[String] {
        self.entries
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, a)| a.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Intent, &[String])> {
        self.entries.iter().map(|(i, a)| (*i, a.as_slice()))
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self {
            entries: Intent::ALL
                .iter()
                .map(|i| (*i, i.default_aliases().iter().map(|a| a.to_string()).collect()))
                .collect(),
        }
    }
}

/// Best (token, alias) pair found for one utterance, before the threshold is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub intent: Intent,
    pub score: f64,
    pub token: String,
    pub alias: String,
}

/// Nothing reached the safety threshold. `best_score` is None when the
/// utterance had no tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoMatch {
    pub best_score: Option<f64>,
}
