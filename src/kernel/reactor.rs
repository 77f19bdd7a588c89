use std::time::Instant;
use serde::{Serialize, Deserialize};
use tokio::sync::{mpsc, watch};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::{interval, Duration}; // Only for the loop driver
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::emotion::{EmotionStabilizer, GroupedState};
use super::event::{Event, FrameSignal, InputContent};
use super::gate::ActuatorGate;
use super::intent::{CommandResolver, Intent, NoMatch, Utterance};
use super::mode::Mode;
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::outputs::actuator::{ActuatorCommand, ActuatorDriver};
use crate::vision::face::FaceBox;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    /// Drain cadence of the event channel, milliseconds.
    pub tick_ms: u64,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self { tick_ms: 20 }
    }
}

/// Why a command is going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Voice(Intent),
    Imitation(GroupedState),
}

/// A command the driver must push to the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideEffect {
    pub command: ActuatorCommand,
    pub cause: Cause,
}

/// What a display collaborator may read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EngineStatus {
    pub mode: Mode,
    pub stable_state: Option<GroupedState>,
    pub face: Option<FaceBox>,
}

/// The single consumer. Owns the resolver, the stabilizer and the gate, so
/// Mode and StableState are only ever touched from here.
pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    pub resolver: CommandResolver,
    pub stabilizer: EmotionStabilizer,
    pub gate: ActuatorGate,
    pub telemetry: TelemetryRecorder,
    config: ReactorConfig,
    face: Option<FaceBox>,
    status_tx: watch::Sender<EngineStatus>,
}

impl Reactor {
    pub fn new(
        receiver: mpsc::Receiver<Event>,
        resolver: CommandResolver,
        stabilizer: EmotionStabilizer,
        config: ReactorConfig,
    ) -> Self {
        let (status_tx, _) = watch::channel(EngineStatus::default());
        Self {
            receiver,
            resolver,
            stabilizer,
            gate: ActuatorGate::new(),
            telemetry: TelemetryRecorder::new(),
            config,
            face: None,
            status_tx,
        }
    }

    pub fn from_config(receiver: mpsc::Receiver<Event>, config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            receiver,
            config.build_resolver()?,
            config.build_stabilizer(),
            config.reactor.clone(),
        ))
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            mode: self.gate.mode(),
            stable_state: self.stabilizer.stable_state(),
            face: self.face,
        }
    }

    /// Status updates, published after every step that changed something.
    pub fn subscribe(&self) -> watch::Receiver<EngineStatus> {
        self.status_tx.subscribe()
    }

    /// Pure Step: consumes a batch of events in arrival order and returns the
    /// commands to be executed by the driver.
    /// MUST NOT await I/O or timers.
    pub fn tick_step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        let mut effects = Vec::new();

        for event in events {
            let Event::Input(input) = event;
            let effect = match input.content {
                InputContent::Utterance(text) => self.on_utterance(&text),
                InputContent::Frame(frame) => self.on_frame(frame),
                InputContent::Face(face) => {
                    self.face = Some(face);
                    None
                }
            };
            effects.extend(effect);
        }

        let status = self.status();
        self.status_tx.send_if_modified(|current| {
            if *current != status {
                *current = status;
                true
            } else {
                false
            }
        });

        effects
    }

    fn on_utterance(&mut self, text: &str) -> Option<SideEffect> {
        let utterance = Utterance::clean(text);

        let hit = match self.resolver.resolve_utterance(&utterance) {
            Ok(hit) => hit,
            // NoMatch is a normal outcome
            Err(NoMatch { best_score }) => {
                self.telemetry.record(TelemetryEvent::IntentRejected { best_score });
                return None;
            }
        };

        info!(
            "[LOGIC] Winner: {} ({}%) ['{}' vs '{}']",
            hit.intent,
            (hit.score * 100.0) as u32,
            hit.token,
            hit.alias
        );
        self.telemetry.record(TelemetryEvent::IntentResolved {
            intent: hit.intent,
            score: hit.score,
        });

        let decision = self.gate.on_intent(hit.intent);
        if decision.mode_changed() {
            self.telemetry.record(TelemetryEvent::ModeTransition {
                from: decision.from,
                to: decision.to,
            });
        }

        decision.command.map(|command| SideEffect {
            command,
            cause: Cause::Voice(hit.intent),
        })
    }

    fn on_frame(&mut self, frame: FrameSignal) -> Option<SideEffect> {
        if frame.face.is_some() {
            self.face = frame.face;
        }

        let transition = self.stabilizer.observe(frame.label, frame.at).transition()?;
        let command = self.gate.on_transition(&transition);

        info!(
            "[VISION] STATE {:?} -> {} ({})",
            transition.from,
            transition.to,
            if command.is_some() { "forwarded" } else { "idle, not forwarded" }
        );
        self.telemetry.record(TelemetryEvent::StableStateTransition {
            from: transition.from,
            to: transition.to,
            forwarded: command.is_some(),
        });

        command.map(|command| SideEffect {
            command,
            cause: Cause::Imitation(transition.to),
        })
    }

    /// Driver side: push commands out. Failures are dropped, never raised.
    pub fn execute(&mut self, effects: Vec<SideEffect>, actuator: &mut ActuatorDriver) {
        for effect in effects {
            let delivery = actuator.dispatch(effect.command);
            info!("[{:?}] Sent: {} -> {:?}", effect.cause, effect.command, delivery);
            self.telemetry.record(TelemetryEvent::ActuatorCommand {
                command: effect.command,
                delivery,
            });
        }
    }

    /// Async Driver Loop. Returns on cancellation or once every producer has
    /// hung up; the actuator is released before returning.
    pub async fn run(&mut self, actuator: &mut ActuatorDriver, cancel: CancellationToken) {
        info!("Reactor Pipeline Started. Tick: {}ms", self.config.tick_ms);
        let started = Instant::now();

        let mut cadence = interval(Duration::from_millis(self.config.tick_ms));
        cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            // Driver: Wait for physical time boundary
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
                _ = cadence.tick() => {}
            }

            // Driver: Drain Events
            let mut events: Vec<Event> = Vec::new();
            let mut hung_up = false;
            loop {
                match self.receiver.try_recv() {
                    Ok(event) => events.push(event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        hung_up = true;
                        break;
                    }
                }
            }

            // Core: Execute Step
            let effects = self.tick_step(events);

            // Driver: Execute Side Effects
            self.execute(effects, actuator);

            if hung_up {
                info!("All producers closed");
                cancel.cancel();
                break;
            }
        }

        actuator.release();

        let summary = self.telemetry.aggregate_session(started.elapsed().as_secs_f64());
        match serde_json::to_string(&summary) {
            Ok(json) => info!("Session summary: {}", json),
            Err(e) => warn!("Failed to serialize session summary: {}", e),
        }
    }
}
