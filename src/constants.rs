//! Constants used throughout the classification pipeline

/// Default base neck angle threshold in degrees
pub const DEFAULT_NECK_THRESHOLD: f64 = 40.0;

/// Default base torso angle threshold in degrees
pub const DEFAULT_TORSO_THRESHOLD: f64 = 15.0;

/// Default hysteresis margin in degrees
pub const DEFAULT_HYSTERESIS_MARGIN: f64 = 2.0;

/// Default smoothing window size in frames
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;

/// Vertical reference point offset above a pivot, in image units
pub const VERTICAL_REFERENCE_OFFSET: f64 = 100.0;

/// Minimum vector magnitude accepted by the angle calculation
pub const MIN_VECTOR_MAGNITUDE: f64 = 1e-6;

/// Number of recent history records considered for stage updates
pub const STAGE_HISTORY_WINDOW: usize = 7;

/// Good-posture percentage below which the stage is Early
pub const EARLY_STAGE_CEILING: f64 = 30.0;

/// Good-posture percentage below which the stage is Middle
pub const MIDDLE_STAGE_CEILING: f64 = 70.0;

/// Shoulder offset below which the subject counts as side-on to the camera
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 100.0;

/// Default weighted-score threshold for the progressive scorer
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.70;
