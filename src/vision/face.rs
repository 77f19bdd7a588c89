use serde::{Serialize, Deserialize};

/// Face bounding box in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Keeps the display box steady: follows the largest face, exponentially smoothed.
#[derive(Debug, Clone)]
pub struct FaceTracker {
    /// Weight of the previous box, 0.0 - 1.0. Higher = steadier, slower.
    alpha: f32,
    smoothed: Option<FaceBox>,
}

impl FaceTracker {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            smoothed: None,
        }
    }

    /// Feed this frame's detections. With no detection the last box is kept.
    pub fn update(&mut self, faces: &[FaceBox]) -> Option<FaceBox> {
        let largest = faces
            .iter()
            .copied()
            .max_by(|a, b| a.area().total_cmp(&b.area()));

        if let Some(face) = largest {
            let a = self.alpha;
            self.smoothed = Some(match self.smoothed {
                None => face,
                Some(prev) => FaceBox {
                    x: a * prev.x + (1.0 - a) * face.x,
                    y: a * prev.y + (1.0 - a) * face.y,
                    width: a * prev.width + (1.0 - a) * face.width,
                    height: a * prev.height + (1.0 - a) * face.height,
                },
            });
        }

        self.smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_detection_is_taken_as_is() {
        let mut tracker = FaceTracker::new(0.7);
        let face = FaceBox::new(10.0, 20.0, 100.0, 100.0);
        assert_eq!(tracker.update(&[face]), Some(face));
    }

    #[test]
    fn largest_face_wins_and_is_smoothed() {
        let mut tracker = FaceTracker::new(0.5);
        tracker.update(&[FaceBox::new(0.0, 0.0, 100.0, 100.0)]);

        let small = FaceBox::new(500.0, 500.0, 10.0, 10.0);
        let big = FaceBox::new(100.0, 0.0, 100.0, 100.0);
        let out = tracker.update(&[small, big]).unwrap();
        assert_eq!(out, FaceBox::new(50.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn missing_detection_keeps_last_box() {
        let mut tracker = FaceTracker::new(0.7);
        let face = FaceBox::new(1.0, 2.0, 3.0, 4.0);
        tracker.update(&[face]);
        assert_eq!(tracker.update(&[]), Some(face));
    }
}
