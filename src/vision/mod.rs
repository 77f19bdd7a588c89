pub mod face;
pub mod pipeline;

pub use face::{FaceBox, FaceTracker};
pub use pipeline::{EmotionClassifier, FrameObservation, VisionPipeline};
