use super::emotion::RawEmotionLabel;
use super::time::Timestamp;
use crate::vision::face::FaceBox;

#[derive(Debug, Clone)]
pub enum Event {
    /// External signals (Speech, Vision)
    Input(InputEvent),
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    pub content: InputContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputContent {
    /// One transcribed phrase, already lowercased by the producer or not.
    Utterance(String),
    /// One classified video frame.
    Frame(FrameSignal),
    /// A frame with a face but no classification; only the display box moves.
    Face(FaceBox),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSignal {
    pub label: RawEmotionLabel,
    pub at: Timestamp,
    /// Smoothed face box for display, if a face is tracked.
    pub face: Option<FaceBox>,
}

impl InputEvent {
    pub fn utterance(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Utterance(text.to_string()),
        }
    }

    pub fn frame(source: &str, label: RawEmotionLabel, at: Timestamp) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Frame(FrameSignal { label, at, face: None }),
        }
    }
}

impl From<InputEvent> for Event {
    fn from(input: InputEvent) -> Self {
        Event::Input(input)
    }
}
