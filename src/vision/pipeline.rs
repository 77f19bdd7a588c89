use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, debug, warn};

use crate::config::VisionConfig;
use crate::error::SourceError;
use crate::kernel::emotion::RawEmotionLabel;
use crate::kernel::event::{Event, FrameSignal, InputContent, InputEvent};
use crate::kernel::time::MonotonicClock;
use super::face::{FaceBox, FaceTracker};

/// What the classifier saw in one processed frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameObservation {
    /// None when no face was classified in this frame.
    pub label: Option<RawEmotionLabel>,
    pub faces: Vec<FaceBox>,
}

/// Camera + face localization + emotion model, behind one blocking call.
pub trait EmotionClassifier: Send {
    /// Capture and classify the next frame. `Ok(None)` means no frame was available.
    fn classify(&mut self) -> Result<Option<FrameObservation>, SourceError>;
}

pub struct VisionPipeline<C> {
    classifier: C,
    tx: mpsc::Sender<Event>,
    clock: MonotonicClock,
    tracker: FaceTracker,
    inference_interval: Duration,
    cancel: CancellationToken,
}

impl<C: EmotionClassifier> VisionPipeline<C> {
    pub fn new(
        classifier: C,
        tx: mpsc::Sender<Event>,
        clock: MonotonicClock,
        inference_interval: Duration,
        smooth_alpha: f32,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            classifier,
            tx,
            clock,
            tracker: FaceTracker::new(smooth_alpha),
            inference_interval,
            cancel,
        }
    }

    pub fn from_config(
        classifier: C,
        tx: mpsc::Sender<Event>,
        clock: MonotonicClock,
        config: &VisionConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self::new(classifier, tx, clock, config.inference_interval(), config.smooth_alpha, cancel)
    }

    /// Run the vision loop. This is designed to be run in a dedicated OS thread
    /// (model inference blocks).
    pub fn run(mut self) {
        info!("Vision Pipeline Started ({:?} between inferences)", self.inference_interval);

        while !self.cancel.is_cancelled() {
            let started = Instant::now();

            match self.classifier.classify() {
                Ok(Some(observation)) => {
                    if !self.forward(observation) {
                        break;
                    }
                }
                // No frame this cycle: nothing happened.
                Ok(None) => {}
                Err(e) => debug!("Frame skipped: {}", e),
            }

            // Inference rate limit
            if let Some(rest) = self.inference_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        info!("Vision Pipeline Stopped");
    }

    /// Returns false once the consumer is gone.
    fn forward(&mut self, observation: FrameObservation) -> bool {
        let face = self.tracker.update(&observation.faces);

        let content = match (observation.label, face) {
            (Some(label), face) => InputContent::Frame(FrameSignal {
                label,
                at: self.clock.now(),
                face,
            }),
            // Unclassified but a face moved: keep the display current
            (None, Some(face)) if !observation.faces.is_empty() => InputContent::Face(face),
            (None, _) => return true,
        };

        let event = Event::Input(InputEvent {
            source: "Vision".to_string(),
            content,
        });

        if self.tx.blocking_send(event).is_err() {
            warn!("Vision consumer closed");
            return false;
        }
        true
    }
}
