//! Per-frame posture pipeline.
//!
//! Wires the fusion engine, smoother, classifier, and threshold controller
//! into the per-frame path: raw keypoints in, fused angles through the
//! smoother, smoothed angles into the hysteresis classifier. Stage updates
//! run out-of-band and push a fresh threshold snapshot into the classifier
//! in one step, so a frame never observes a half-applied threshold change.

use crate::adaptive::{AdaptiveThresholdController, HistoryRecord, RehabLevel, ThresholdSet};
use crate::classifier::{HysteresisClassifier, PostureState};
use crate::constants::{
    DEFAULT_HYSTERESIS_MARGIN, DEFAULT_NECK_THRESHOLD, DEFAULT_SMOOTHING_WINDOW, DEFAULT_TORSO_THRESHOLD,
};
use crate::fusion::AngleFusionEngine;
use crate::keypoints::KeypointSet;
use crate::smoother::TemporalSmoother;
use log::debug;

/// Classification result for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Smoothed neck angle in degrees; 0.0 when undetermined
    pub neck_angle: f64,
    /// Smoothed torso angle in degrees; 0.0 when undetermined
    pub torso_angle: f64,
    /// Posture state after this frame
    pub posture_state: PostureState,
}

/// One posture stream's worth of pipeline state.
///
/// Each pipeline owns its fusion engine, smoother, classifier, and threshold
/// controller outright; nothing is shared between instances. Deployments
/// handling several patients or cameras construct one pipeline per stream,
/// each accessed by a single logical caller at a time.
pub struct PosturePipeline {
    fusion: AngleFusionEngine,
    smoother: TemporalSmoother,
    classifier: HysteresisClassifier,
    controller: AdaptiveThresholdController,
}

impl PosturePipeline {
    /// Build a pipeline starting at the `Early` rehabilitation stage.
    ///
    /// The classifier is seeded with the stage thresholds derived from the
    /// base values.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero or `hysteresis_margin` is negative.
    #[must_use]
    pub fn new(
        window_size: usize,
        base_neck_threshold: f64,
        base_torso_threshold: f64,
        hysteresis_margin: f64,
    ) -> Self {
        let controller = AdaptiveThresholdController::new(base_neck_threshold, base_torso_threshold);
        let thresholds = controller.current_thresholds();
        Self {
            fusion: AngleFusionEngine::new(),
            smoother: TemporalSmoother::new(window_size),
            classifier: HysteresisClassifier::new(thresholds.neck, thresholds.torso, hysteresis_margin),
            controller,
        }
    }

    /// Run fusion, smoothing, and classification for one frame.
    pub fn process_frame(&mut self, keypoints: &KeypointSet) -> FrameReport {
        let fused = self.fusion.fused_sample(keypoints);
        let smoothed = self.smoother.smooth(fused.neck, fused.torso);
        self.classifier.evaluate(smoothed.neck, smoothed.torso);
        FrameReport {
            neck_angle: smoothed.neck,
            torso_angle: smoothed.torso,
            posture_state: self.classifier.state(),
        }
    }

    /// Re-derive the rehabilitation stage from session history and push the
    /// resulting thresholds into the classifier.
    ///
    /// Returns the threshold set now in effect. The classifier state is left
    /// untouched; only the boundaries move.
    pub fn apply_history(&mut self, history: &[HistoryRecord]) -> ThresholdSet {
        self.controller.update_stage(history);
        self.push_thresholds()
    }

    /// Explicit stage override with the same threshold push as
    /// [`apply_history`](PosturePipeline::apply_history).
    pub fn set_stage(&mut self, stage: RehabLevel) -> ThresholdSet {
        self.controller.set_stage(stage);
        self.push_thresholds()
    }

    #[must_use]
    pub fn stage(&self) -> RehabLevel {
        self.controller.stage()
    }

    #[must_use]
    pub fn current_thresholds(&self) -> ThresholdSet {
        self.controller.current_thresholds()
    }

    #[must_use]
    pub fn posture_state(&self) -> PostureState {
        self.classifier.state()
    }

    /// Clear per-session state for a new exercise session. The stage and
    /// thresholds carry over; only the smoothing window and classifier state
    /// are discarded.
    pub fn reset(&mut self) {
        debug!("pipeline reset");
        self.smoother.reset();
        self.classifier.reset();
    }

    fn push_thresholds(&mut self) -> ThresholdSet {
        let thresholds = self.controller.current_thresholds();
        self.classifier.update_thresholds(thresholds.neck, thresholds.torso);
        thresholds
    }
}

impl Default for PosturePipeline {
    fn default() -> Self {
        Self::new(
            DEFAULT_SMOOTHING_WINDOW,
            DEFAULT_NECK_THRESHOLD,
            DEFAULT_TORSO_THRESHOLD,
            DEFAULT_HYSTERESIS_MARGIN,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;
    use crate::keypoints::Keypoint;

    fn upright_keypoints() -> KeypointSet {
        let mut set = KeypointSet::new();
        set.set(Keypoint::LeftShoulder, Point2D::new(300.0, 240.0));
        set.set(Keypoint::LeftEar, Point2D::new(310.0, 160.0));
        set.set(Keypoint::LeftHip, Point2D::new(295.0, 400.0));
        set
    }

    fn slumped_keypoints() -> KeypointSet {
        let mut set = KeypointSet::new();
        set.set(Keypoint::LeftShoulder, Point2D::new(300.0, 240.0));
        // Ear far forward of the shoulder
        set.set(Keypoint::LeftEar, Point2D::new(420.0, 180.0));
        // Shoulder far forward of the hip
        set.set(Keypoint::LeftHip, Point2D::new(200.0, 400.0));
        set
    }

    #[test]
    fn test_upright_pose_reports_good() {
        let mut pipeline = PosturePipeline::default();
        pipeline.set_stage(RehabLevel::Late);
        let report = pipeline.process_frame(&upright_keypoints());
        assert_eq!(report.posture_state, PostureState::Good);
        assert!(report.neck_angle < 15.0);
        assert!(report.torso_angle < 15.0);
    }

    #[test]
    fn test_sustained_slump_reports_bad() {
        let mut pipeline = PosturePipeline::default();
        pipeline.set_stage(RehabLevel::Late);
        let keypoints = slumped_keypoints();
        let mut last = None;
        for _ in 0..10 {
            last = Some(pipeline.process_frame(&keypoints));
        }
        assert_eq!(last.unwrap().posture_state, PostureState::Bad);
    }

    #[test]
    fn test_missing_landmarks_do_not_flip_state() {
        let mut pipeline = PosturePipeline::default();
        pipeline.set_stage(RehabLevel::Late);
        pipeline.process_frame(&upright_keypoints());

        // A dropped frame yields sentinel angles, which never cross any
        // threshold, so the state stays Good
        let report = pipeline.process_frame(&KeypointSet::new());
        assert_eq!(report.posture_state, PostureState::Good);
    }

    #[test]
    fn test_history_update_moves_thresholds_not_state() {
        let mut pipeline = PosturePipeline::default();
        assert_eq!(pipeline.stage(), RehabLevel::Early);

        let history = vec![HistoryRecord::Percentage(80.0); 7];
        let thresholds = pipeline.apply_history(&history);
        assert_eq!(pipeline.stage(), RehabLevel::Late);
        assert_eq!(thresholds, ThresholdSet { neck: 40.0, torso: 15.0 });
        assert_eq!(pipeline.posture_state(), PostureState::Good);
    }

    #[test]
    fn test_reset_preserves_stage() {
        let mut pipeline = PosturePipeline::default();
        pipeline.set_stage(RehabLevel::Middle);
        for _ in 0..5 {
            pipeline.process_frame(&slumped_keypoints());
        }
        pipeline.reset();
        assert_eq!(pipeline.posture_state(), PostureState::Good);
        assert_eq!(pipeline.stage(), RehabLevel::Middle);
        assert_eq!(pipeline.current_thresholds(), ThresholdSet { neck: 48.0, torso: 22.5 });
    }
}
