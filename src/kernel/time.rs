use std::time::Instant;
use serde::{Serialize, Deserialize};

/// Seconds on a monotonic timeline shared by every producer of one engine.
/// Only differences between timestamps carry meaning.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub secs: f64,
}

impl Timestamp {
    pub fn from_secs(secs: f64) -> Self {
        Timestamp { secs }
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    pub fn since(&self, earlier: Timestamp) -> f64 {
        self.secs - earlier.secs
    }
}

/// Clock handed to producers so that utterances and frames land on the same timeline.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.origin.elapsed().as_secs_f64())
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
