pub mod transcriber;

pub use transcriber::{Transcriber, UtterancePipeline};
