use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::error::LabelError;

/// Fine-grained label produced by the frame classifier, one per processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawEmotionLabel {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl RawEmotionLabel {
    pub const ALL: [RawEmotionLabel; 7] = [
        RawEmotionLabel::Angry,
        RawEmotionLabel::Disgust,
        RawEmotionLabel::Fear,
        RawEmotionLabel::Happy,
        RawEmotionLabel::Sad,
        RawEmotionLabel::Surprise,
        RawEmotionLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RawEmotionLabel::Angry => "angry",
            RawEmotionLabel::Disgust => "disgust",
            RawEmotionLabel::Fear => "fear",
            RawEmotionLabel::Happy => "happy",
            RawEmotionLabel::Sad => "sad",
            RawEmotionLabel::Surprise => "surprise",
            RawEmotionLabel::Neutral => "neutral",
        }
    }

    /// First known label contained in a classifier display string such as
    /// "Happy 87%". Labels are tried in `ALL` order.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL.into_iter().find(|raw| lower.contains(raw.as_str()))
    }
}

impl fmt::Display for RawEmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RawEmotionLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|raw| raw.as_str() == needle)
            .ok_or_else(|| LabelError::Unknown(s.to_string()))
    }
}

/// Coarse state used for actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupedState {
    Happy,
    Sad,
    Angry,
}

impl GroupedState {
    /// The pair the classifier mixes up most often.
    pub fn is_confusable(&self) -> bool {
        matches!(self, GroupedState::Sad | GroupedState::Angry)
    }
}

impl fmt::Display for GroupedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupedState::Happy => "Happy",
            GroupedState::Sad => "Sad",
            GroupedState::Angry => "Angry",
        };
        f.write_str(name)
    }
}

/// Many-to-one raw -> grouped mapping. A label missing from the map never
/// influences the stable state.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionGrouping {
    map: HashMap<RawEmotionLabel, GroupedState>,
}

impl EmotionGrouping {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (RawEmotionLabel, GroupedState)>) -> Self {
        Self { map: pairs.into_iter().collect() }
    }

    pub fn group(&self, raw: RawEmotionLabel) -> Option<GroupedState> {
        self.map.get(&raw).copied()
    }
}

impl Default for EmotionGrouping {
    fn default() -> Self {
        use GroupedState as G;
        use RawEmotionLabel as R;
        Self::from_pairs([
            (R::Happy, G::Happy),
            (R::Surprise, G::Happy),
            (R::Sad, G::Sad),
            (R::Neutral, G::Sad),
            (R::Angry, G::Angry),
            (R::Disgust, G::Angry),
            (R::Fear, G::Angry),
        ])
    }
}
