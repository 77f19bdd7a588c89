pub mod types;
pub mod stabilizer;

pub use types::{EmotionGrouping, GroupedState, RawEmotionLabel};
pub use stabilizer::{Decision, EmotionStabilizer, HoldReason, StabilizerParams, StateTransition};
