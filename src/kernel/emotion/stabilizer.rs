use std::collections::VecDeque;
use serde::{Serialize, Deserialize};
use tracing::trace;

use super::types::{EmotionGrouping, GroupedState, RawEmotionLabel};
use crate::kernel::time::Timestamp;

/// Tuning for the sliding-window vote and its hysteresis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerParams {
    /// Trailing window kept in history, seconds.
    pub history_window_secs: f64,
    /// Minimum entries in the window before any decision.
    pub min_frames: usize,
    /// Fraction of the window the winner must hold.
    pub min_dominance: f64,
    /// Raw-count lead over the runner-up.
    pub min_margin: usize,
    /// Dominance floor used instead of `min_dominance` when the winner is Angry.
    pub angry_min_dominance: f64,
    /// Dwell time after a transition before another is allowed, seconds.
    pub min_state_duration_secs: f64,
    /// Extra dominance needed to switch directly between Sad and Angry.
    pub sad_angry_penalty: f64,
}

impl Default for StabilizerParams {
    fn default() -> Self {
        Self {
            history_window_secs: 2.0,
            min_frames: 6,
            min_dominance: 0.70,
            min_margin: 2,
            angry_min_dominance: 0.65,
            min_state_duration_secs: 2.0,
            sad_angry_penalty: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HistoryEntry {
    at: Timestamp,
    state: GroupedState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: Option<GroupedState>,
    pub to: GroupedState,
    pub at: Timestamp,
}

/// Why an observation did not move the stable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    InsufficientFrames,
    WeakDominance,
    NarrowMargin,
    Dwell,
    ConfusablePair,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Transition(StateTransition),
    Hold(HoldReason),
    /// Label has no grouped state; history untouched.
    Ignored,
}

impl Decision {
    pub fn transition(&self) -> Option<StateTransition> {
        match self {
            Decision::Transition(t) => Some(*t),
            _ => None,
        }
    }
}

/// Window statistics for one update.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tally {
    top: GroupedState,
    dominance: f64,
    margin: usize,
}

/// Turns per-frame labels into a debounced stable state.
///
/// Sliding-window majority vote with hysteresis: strong dominance, a raw-count
/// margin, a minimum dwell time, and an extra bar between Sad and Angry.
/// History and stable state are private; the only way in is `observe`.
#[derive(Debug, Clone)]
pub struct EmotionStabilizer {
    params: StabilizerParams,
    grouping: EmotionGrouping,
    history: VecDeque<HistoryEntry>,
    stable: Option<GroupedState>,
    last_transition: Option<Timestamp>,
}

impl EmotionStabilizer {
    pub fn new(params: StabilizerParams, grouping: EmotionGrouping) -> Self {
        Self {
            params,
            grouping,
            history: VecDeque::new(),
            stable: None,
            last_transition: None,
        }
    }

    pub fn stable_state(&self) -> Option<GroupedState> {
        self.stable
    }

    pub fn window_len(&self) -> usize {
        self.history.len()
    }

    /// Ingest one classification event. At most one transition per call.
    pub fn observe(&mut self, raw: RawEmotionLabel, now: Timestamp) -> Decision {
        let Some(state) = self.grouping.group(raw) else {
            return Decision::Ignored;
        };

        self.history.push_back(HistoryEntry { at: now, state });
        let window = self.params.history_window_secs;
        self.history.retain(|e| now.since(e.at) <= window);

        let decision = self.decide(now);
        if let Decision::Hold(reason) = decision {
            trace!(?reason, window = self.history.len(), "stabilizer hold");
        }
        decision
    }

    fn decide(&mut self, now: Timestamp) -> Decision {
        if self.history.len() < self.params.min_frames {
            return Decision::Hold(HoldReason::InsufficientFrames);
        }

        let Some(tally) = self.tally() else {
            return Decision::Hold(HoldReason::InsufficientFrames);
        };

        let floor = if tally.top == GroupedState::Angry {
            self.params.angry_min_dominance
        } else {
            self.params.min_dominance
        };
        if tally.dominance < floor {
            return Decision::Hold(HoldReason::WeakDominance);
        }
        if tally.margin < self.params.min_margin {
            return Decision::Hold(HoldReason::NarrowMargin);
        }

        if let Some(current) = self.stable {
            if let Some(since) = self.last_transition {
                if now.since(since) < self.params.min_state_duration_secs {
                    return Decision::Hold(HoldReason::Dwell);
                }
            }
            if current != tally.top && current.is_confusable() && tally.top.is_confusable() {
                let elevated = self.params.min_dominance + self.params.sad_angry_penalty;
                if tally.dominance < elevated {
                    return Decision::Hold(HoldReason::ConfusablePair);
                }
            }
        }

        if self.stable == Some(tally.top) {
            return Decision::Hold(HoldReason::Unchanged);
        }

        let transition = StateTransition {
            from: self.stable,
            to: tally.top,
            at: now,
        };
        self.stable = Some(tally.top);
        self.last_transition = Some(now);
        Decision::Transition(transition)
    }

    /// Counts per state; equal counts rank by first appearance in the window.
    fn tally(&self) -> Option<Tally> {
        let mut counts: Vec<(GroupedState, usize)> = Vec::with_capacity(3);
        for entry in &self.history {
            match counts.iter_mut().find(|(s, _)| *s == entry.state) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.state, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let (top, top_count) = *counts.first()?;
        let second_count = counts.get(1).map(|(_, n)| *n).unwrap_or(0);
        let total = self.history.len();

        Some(Tally {
            top,
            dominance: top_count as f64 / total as f64,
            margin: top_count - second_count,
        })
    }
}

impl Default for EmotionStabilizer {
    fn default() -> Self {
        Self::new(StabilizerParams::default(), EmotionGrouping::default())
    }
}
