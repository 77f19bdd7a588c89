use std::collections::VecDeque;
use super::event::TelemetryEvent;
use crate::outputs::actuator::Delivery;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub resolver_stats: ResolverStats,
    pub stability_stats: StabilityStats,
    pub actuator_stats: ActuatorStats,
    pub mode_transitions: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverStats {
    pub resolved: u64,
    pub rejected: u64,
    pub avg_resolved_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StabilityStats {
    pub transitions: u64,
    pub forwarded: u64,
    pub suppressed: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActuatorStats {
    pub sent: u64,
    pub dropped: u64,
}

impl TelemetrySnapshot {
    /// Fold one event into the counters.
    pub fn absorb(&mut self, event: &TelemetryEvent) {
        match event {
            TelemetryEvent::IntentResolved { score, .. } => {
                self.resolver_stats.resolved += 1;
                let n = self.resolver_stats.resolved as f64;
                self.resolver_stats.avg_resolved_score += (score - self.resolver_stats.avg_resolved_score) / n;
            }
            TelemetryEvent::IntentRejected { .. } => self.resolver_stats.rejected += 1,
            TelemetryEvent::ModeTransition { .. } => self.mode_transitions += 1,
            TelemetryEvent::StableStateTransition { forwarded, .. } => {
                self.stability_stats.transitions += 1;
                if *forwarded {
                    self.stability_stats.forwarded += 1;
                } else {
                    self.stability_stats.suppressed += 1;
                }
            }
            TelemetryEvent::ActuatorCommand { delivery, .. } => match delivery {
                Delivery::Sent => self.actuator_stats.sent += 1,
                Delivery::NoSink | Delivery::Failed => self.actuator_stats.dropped += 1,
            },
            TelemetryEvent::SessionSummary { .. } => {}
        }
    }
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();
    for event in events {
        snap.absorb(event);
    }
    snap
}
