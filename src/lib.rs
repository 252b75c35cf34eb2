//! Posture classification library for SCI rehabilitation monitoring.
//!
//! This library turns a stream of noisy per-frame skeletal landmarks into a
//! stable, clinically adjustable good/bad posture signal:
//! 1. Angle fusion combining bilateral keypoint pairs with a median
//! 2. Weighted temporal smoothing favoring recent samples
//! 3. Hysteresis classification suppressing threshold-boundary flicker
//! 4. Adaptive thresholds following rehabilitation progress
//!
//! Landmark extraction itself is out of scope: an external pose estimator
//! supplies a [`keypoints::KeypointSet`] per frame, and this library takes
//! it from there. No per-frame operation can fail; missing landmarks and
//! degenerate geometry degrade to a sentinel angle of `0.0` ("could not be
//! computed") so a bad frame never halts the stream.
//!
//! # Examples
//!
//! ## Per-frame classification
//!
//! ```
//! use posture_classification::geometry::Point2D;
//! use posture_classification::keypoints::{Keypoint, KeypointSet};
//! use posture_classification::pipeline::PosturePipeline;
//!
//! // Window of 10 frames, base thresholds 40°/15°, 2° hysteresis margin
//! let mut pipeline = PosturePipeline::new(10, 40.0, 15.0, 2.0);
//!
//! // One frame's landmarks from the external detector (pixel coordinates)
//! let mut keypoints = KeypointSet::new();
//! keypoints.set(Keypoint::LeftShoulder, Point2D::new(320.0, 240.0));
//! keypoints.set(Keypoint::LeftEar, Point2D::new(330.0, 160.0));
//! keypoints.set(Keypoint::LeftHip, Point2D::new(315.0, 420.0));
//!
//! let report = pipeline.process_frame(&keypoints);
//! println!(
//!     "neck {:.1}°, torso {:.1}°, {:?}",
//!     report.neck_angle, report.torso_angle, report.posture_state
//! );
//! ```
//!
//! ## Adapting thresholds to rehabilitation progress
//!
//! ```
//! use posture_classification::adaptive::{AdaptiveThresholdController, HistoryRecord};
//!
//! let mut controller = AdaptiveThresholdController::new(40.0, 15.0);
//!
//! // A week of session summaries, oldest first
//! let history = [
//!     HistoryRecord::Percentage(72.0),
//!     HistoryRecord::Durations { good_secs: 1800.0, bad_secs: 600.0 },
//!     HistoryRecord::Percentage(81.0),
//! ];
//! controller.update_stage(&history);
//!
//! let thresholds = controller.current_thresholds();
//! println!("stage {}: neck {}°, torso {}°", controller.stage(), thresholds.neck, thresholds.torso);
//! ```
//!
//! ## Smoothing and classifying precomputed angles
//!
//! ```
//! use posture_classification::classifier::HysteresisClassifier;
//! use posture_classification::smoother::TemporalSmoother;
//!
//! let mut smoother = TemporalSmoother::new(10);
//! let mut classifier = HysteresisClassifier::new(40.0, 15.0, 2.0);
//!
//! for (neck, torso) in [(35.2, 12.1), (38.5, 14.3), (36.1, 11.8)] {
//!     let smoothed = smoother.smooth(neck, torso);
//!     let is_good = classifier.evaluate(smoothed.neck, smoothed.torso);
//!     assert!(is_good);
//! }
//! ```

/// Vector geometry and the three-point angle calculation
pub mod geometry;

/// Anatomical keypoint names and per-frame keypoint sets
pub mod keypoints;

/// Multi-keypoint angle fusion with median combination
pub mod fusion;

/// Weighted temporal smoothing of fused angles
pub mod smoother;

/// Hysteresis-based posture state classification
pub mod classifier;

/// Rehabilitation-stage threshold adaptation
pub mod adaptive;

/// Progressive weighted posture scoring
pub mod scoring;

/// Per-frame pipeline wiring fusion, smoothing, and classification
pub mod pipeline;

/// Error types and result handling
pub mod error;

/// Constants used throughout the pipeline
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
