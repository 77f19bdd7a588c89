use std::collections::VecDeque;
use super::event::TelemetryEvent;
use super::metrics::{TelemetrySnapshot, compute_snapshot};

const MAX_EVENTS: usize = 10_000;

/// Recent events in a bounded ring, plus counters over the whole session.
#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
    totals: TelemetrySnapshot,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
            totals: TelemetrySnapshot::default(),
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        self.totals.absorb(&event);
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.buffer.iter()
    }

    /// Metrics over the buffered (most recent) events only.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.buffer)
    }

    /// Called on shutdown. Counts the whole session, not just the ring.
    pub fn aggregate_session(&self, duration_secs: f64) -> TelemetryEvent {
        let totals = &self.totals;
        TelemetryEvent::SessionSummary {
            duration_secs,
            intents_resolved: totals.resolver_stats.resolved,
            intents_rejected: totals.resolver_stats.rejected,
            stable_transitions: totals.stability_stats.transitions,
            commands_sent: totals.actuator_stats.sent,
            commands_dropped: totals.actuator_stats.dropped,
        }
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::intent::Intent;

    #[test]
    fn session_summary_outlives_the_ring() {
        let mut recorder = TelemetryRecorder::new();
        for _ in 0..MAX_EVENTS + 5 {
            recorder.record(TelemetryEvent::IntentRejected { best_score: None });
        }
        recorder.record(TelemetryEvent::IntentResolved { intent: Intent::Stop, score: 0.8 });
        recorder.record(TelemetryEvent::IntentResolved { intent: Intent::Sad, score: 1.0 });

        assert_eq!(recorder.events().count(), MAX_EVENTS);
        assert_eq!(recorder.snapshot().resolver_stats.rejected, MAX_EVENTS as u64 - 2);

        let TelemetryEvent::SessionSummary { intents_rejected, intents_resolved, .. } =
            recorder.aggregate_session(1.0)
        else {
            panic!("expected a session summary");
        };
        assert_eq!(intents_rejected, MAX_EVENTS as u64 + 5);
        assert_eq!(intents_resolved, 2);
        assert!((recorder.snapshot().resolver_stats.avg_resolved_score - 0.9).abs() < 1e-9);
    }
}
