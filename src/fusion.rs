//! Multi-keypoint angle fusion.
//!
//! Each anatomical axis is measured from both the left and the right side of
//! the body where the landmarks allow it, and the results are combined with
//! a median so a single bad limb detection cannot skew the fused angle.

use crate::geometry::{positive_median, three_point_angle};
use crate::keypoints::{Keypoint, KeypointSet};
use log::debug;

/// Anatomical axis measured by the fusion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleAxis {
    Neck,
    Torso,
}

/// Fused neck/torso angle pair for one frame.
///
/// `0.0` on either axis means the angle could not be determined this frame,
/// not that the axis was perfectly aligned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleSample {
    pub neck: f64,
    pub torso: f64,
}

/// Combines bilateral keypoint measurements into one angle per axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleFusionEngine;

impl AngleFusionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fused angle for one axis in degrees; `0.0` when no measurement
    /// method produced a usable value.
    #[must_use]
    pub fn fused_angle(&self, keypoints: &KeypointSet, axis: AngleAxis) -> f64 {
        let angles = match axis {
            AngleAxis::Neck => Self::neck_angles(keypoints),
            AngleAxis::Torso => Self::torso_angles(keypoints),
        };
        if angles.is_empty() {
            debug!("no usable keypoint pair for {axis:?} axis");
        }
        positive_median(&angles)
    }

    /// Both fused axes for one frame.
    #[must_use]
    pub fn fused_sample(&self, keypoints: &KeypointSet) -> AngleSample {
        AngleSample {
            neck: self.fused_angle(keypoints, AngleAxis::Neck),
            torso: self.fused_angle(keypoints, AngleAxis::Torso),
        }
    }

    /// Neck angle per side: shoulder to ear, against the vertical reference
    /// above the shoulder.
    fn neck_angles(keypoints: &KeypointSet) -> Vec<f64> {
        let pairs = [
            (Keypoint::LeftShoulder, Keypoint::LeftEar),
            (Keypoint::RightShoulder, Keypoint::RightEar),
        ];

        let mut angles = Vec::with_capacity(pairs.len());
        for (shoulder_name, ear_name) in pairs {
            let (Some(shoulder), Some(ear)) = (keypoints.get(shoulder_name), keypoints.get(ear_name)) else {
                continue;
            };
            let angle = three_point_angle(shoulder, ear, shoulder.vertical_reference());
            if angle > 0.0 {
                angles.push(angle);
            }
        }
        angles
    }

    /// Torso angle per side: hip to shoulder, against the vertical reference
    /// above the hip. The hip must sit below the shoulder in image
    /// coordinates; an inverted pair is an invalid pose and is skipped.
    fn torso_angles(keypoints: &KeypointSet) -> Vec<f64> {
        let pairs = [
            (Keypoint::LeftHip, Keypoint::LeftShoulder),
            (Keypoint::RightHip, Keypoint::RightShoulder),
        ];

        let mut angles = Vec::with_capacity(pairs.len());
        for (hip_name, shoulder_name) in pairs {
            let (Some(hip), Some(shoulder)) = (keypoints.get(hip_name), keypoints.get(shoulder_name)) else {
                continue;
            };
            if hip.y <= shoulder.y {
                continue;
            }
            let angle = three_point_angle(hip, shoulder, hip.vertical_reference());
            if angle > 0.0 {
                angles.push(angle);
            }
        }
        angles
    }
}
