use std::io::BufRead;

use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::kernel::emotion::RawEmotionLabel;
use crate::kernel::event::{Event, InputEvent};
use crate::kernel::time::MonotonicClock;

/// One console line: `{"say": "please halt"}`, `{"frame": "happy"}`, or plain text
/// (treated as speech).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConsoleLine {
    Say(String),
    Frame(String),
}

/// Line-oriented operator input.
///
/// Reads block, so this runs on a plain OS thread. Nobody joins that thread:
/// a read still pending at shutdown does not keep the process alive.
pub struct ConsoleReader<R> {
    reader: R,
    tx: mpsc::Sender<Event>,
    clock: MonotonicClock,
    cancel: CancellationToken,
}

impl<R: BufRead> ConsoleReader<R> {
    pub fn new(reader: R, tx: mpsc::Sender<Event>, clock: MonotonicClock, cancel: CancellationToken) -> Self {
        Self { reader, tx, clock, cancel }
    }

    /// Returns at end of input, on cancellation, or once the consumer is gone.
    pub fn run(self) {
        let Self { reader, tx, clock, cancel } = self;

        for line in reader.lines() {
            if cancel.is_cancelled() {
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read console: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let Some(event) = parse_line(&line, &clock) else {
                continue;
            };
            if tx.blocking_send(event).is_err() {
                warn!("Console consumer closed");
                break;
            }
        }

        info!("Console input closed");
    }
}

/// Frame labels may be exact (`"happy"`) or classifier display text (`"Happy 87%"`).
pub fn parse_line(line: &str, clock: &MonotonicClock) -> Option<Event> {
    let event = match serde_json::from_str::<ConsoleLine>(line) {
        Ok(ConsoleLine::Frame(label)) => {
            let raw = label
                .parse::<RawEmotionLabel>()
                .ok()
                .or_else(|| RawEmotionLabel::detect(&label));
            let Some(raw) = raw else {
                warn!("Unknown emotion label '{}'", label);
                return None;
            };
            InputEvent::frame("console", raw, clock.now())
        }
        Ok(ConsoleLine::Say(text)) => InputEvent::utterance("console", &text),
        Err(_) => InputEvent::utterance("console", line),
    };
    Some(event.into())
}
