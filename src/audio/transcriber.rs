use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, debug, warn};

use crate::error::SourceError;
use crate::kernel::event::{Event, InputEvent};
use crate::kernel::intent::Utterance;

/// Microphone + speech-to-text, behind one blocking call.
pub trait Transcriber: Send {
    /// Wait for the next phrase. `Ok(None)` means nothing was said this cycle.
    fn next_utterance(&mut self) -> Result<Option<String>, SourceError>;
}

/// Pulls phrases from a transcriber and hands them to the reactor.
pub struct UtterancePipeline<T> {
    transcriber: T,
    tx: mpsc::Sender<Event>,
    cancel: CancellationToken,
}

impl<T: Transcriber> UtterancePipeline<T> {
    pub fn new(transcriber: T, tx: mpsc::Sender<Event>, cancel: CancellationToken) -> Self {
        Self { transcriber, tx, cancel }
    }

    /// Blocking loop, run it on its own OS thread.
    pub fn run(mut self) {
        info!("Utterance Pipeline Started");

        while !self.cancel.is_cancelled() {
            let text = match self.transcriber.next_utterance() {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(SourceError::Unreachable(reason)) => {
                    warn!("[NET] Recognition service unreachable: {}", reason);
                    continue;
                }
                Err(e) => {
                    debug!("No utterance this cycle: {}", e);
                    continue;
                }
            };

            let utterance = Utterance::clean(&text);
            if utterance.is_empty() {
                continue;
            }
            info!("[HEARD]: {}", utterance.text());

            let event = Event::Input(InputEvent::utterance("Speech", &utterance.text()));
            if self.tx.blocking_send(event).is_err() {
                warn!("Utterance consumer closed");
                break;
            }
        }

        info!("Utterance Pipeline Stopped");
    }
}
