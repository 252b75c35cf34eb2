//! Anatomical keypoints delivered by the landmark source.

use crate::geometry::Point2D;

/// Keypoint names required by the angle pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keypoint {
    LeftShoulder,
    RightShoulder,
    LeftEar,
    RightEar,
    LeftHip,
    RightHip,
}

impl Keypoint {
    /// All keypoints the pipeline can consume
    pub const ALL: [Keypoint; 6] = [
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftEar,
        Keypoint::RightEar,
        Keypoint::LeftHip,
        Keypoint::RightHip,
    ];

    const fn slot(self) -> usize {
        match self {
            Keypoint::LeftShoulder => 0,
            Keypoint::RightShoulder => 1,
            Keypoint::LeftEar => 2,
            Keypoint::RightEar => 3,
            Keypoint::LeftHip => 4,
            Keypoint::RightHip => 5,
        }
    }
}

/// One frame's worth of detected keypoints.
///
/// Undetected landmarks stay `None`; the fusion engine skips any measurement
/// method that depends on them. A fresh set is built per frame from the
/// landmark source's output.
#[derive(Debug, Clone, Default)]
pub struct KeypointSet {
    slots: [Option<Point2D>; 6],
}

impl KeypointSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, keypoint: Keypoint, point: Point2D) {
        self.slots[keypoint.slot()] = Some(point);
    }

    /// Record a detector output in normalized [0, 1] coordinates, scaling it
    /// into pixel space by the frame dimensions.
    pub fn set_normalized(&mut self, keypoint: Keypoint, x: f64, y: f64, frame_width: f64, frame_height: f64) {
        self.set(keypoint, Point2D::new(x * frame_width, y * frame_height));
    }

    /// Mark a keypoint as undetected for this frame.
    pub fn clear(&mut self, keypoint: Keypoint) {
        self.slots[keypoint.slot()] = None;
    }

    #[must_use]
    pub fn get(&self, keypoint: Keypoint) -> Option<Point2D> {
        self.slots[keypoint.slot()]
    }

    /// Number of detected keypoints in this set.
    #[must_use]
    pub fn detected_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Distance between the two shoulder points, if both were detected.
    #[must_use]
    pub fn shoulder_offset(&self) -> Option<f64> {
        let left = self.get(Keypoint::LeftShoulder)?;
        let right = self.get(Keypoint::RightShoulder)?;
        Some(left.distance_to(&right))
    }

    /// Whether the subject is seen from the side. A small shoulder offset
    /// means the shoulders overlap in the image, which is the view the
    /// neck/torso angle pipeline is valid for. `None` when either shoulder
    /// was not detected.
    #[must_use]
    pub fn is_side_view(&self, alignment_threshold: f64) -> Option<bool> {
        self.shoulder_offset().map(|offset| offset < alignment_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut set = KeypointSet::new();
        assert_eq!(set.get(Keypoint::LeftEar), None);

        set.set(Keypoint::LeftEar, Point2D::new(10.0, 20.0));
        assert_eq!(set.get(Keypoint::LeftEar), Some(Point2D::new(10.0, 20.0)));
        assert_eq!(set.detected_count(), 1);

        set.clear(Keypoint::LeftEar);
        assert_eq!(set.get(Keypoint::LeftEar), None);
        assert_eq!(set.detected_count(), 0);
    }

    #[test]
    fn test_normalized_coordinates_scale_to_pixels() {
        let mut set = KeypointSet::new();
        set.set_normalized(Keypoint::LeftShoulder, 0.5, 0.25, 640.0, 480.0);
        assert_eq!(set.get(Keypoint::LeftShoulder), Some(Point2D::new(320.0, 120.0)));
    }

    #[test]
    fn test_shoulder_offset_requires_both_shoulders() {
        let mut set = KeypointSet::new();
        set.set(Keypoint::LeftShoulder, Point2D::new(100.0, 200.0));
        assert_eq!(set.shoulder_offset(), None);

        set.set(Keypoint::RightShoulder, Point2D::new(160.0, 280.0));
        let offset = set.shoulder_offset().unwrap();
        assert!((offset - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_view_detection() {
        let mut set = KeypointSet::new();
        assert_eq!(set.is_side_view(100.0), None);

        // Overlapping shoulders: side-on
        set.set(Keypoint::LeftShoulder, Point2D::new(300.0, 240.0));
        set.set(Keypoint::RightShoulder, Point2D::new(320.0, 245.0));
        assert_eq!(set.is_side_view(100.0), Some(true));

        // Shoulders far apart: facing the camera
        set.set(Keypoint::RightShoulder, Point2D::new(500.0, 240.0));
        assert_eq!(set.is_side_view(100.0), Some(false));
    }
}
