//! Hysteresis-based posture state classification.

/// Posture classification state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureState {
    Good,
    Bad,
}

/// Two-state classifier with asymmetric entry and exit thresholds.
///
/// Leaving `Good` takes a single axis exceeding its threshold plus the
/// margin; returning to `Good` takes both axes dropping below their
/// thresholds minus the margin. Angles hovering at a threshold boundary
/// therefore cannot make the state flicker between frames.
pub struct HysteresisClassifier {
    neck_threshold: f64,
    torso_threshold: f64,
    margin: f64,
    state: PostureState,
}

impl HysteresisClassifier {
    /// Create a classifier in the `Good` state.
    ///
    /// # Panics
    ///
    /// Panics if `margin` is negative.
    #[must_use]
    pub fn new(neck_threshold: f64, torso_threshold: f64, margin: f64) -> Self {
        assert!(margin >= 0.0, "Hysteresis margin must be non-negative, got {margin}");
        Self {
            neck_threshold,
            torso_threshold,
            margin,
            state: PostureState::Good,
        }
    }

    /// Classify one frame; returns `true` for good posture.
    ///
    /// May transition the internal state according to the hysteresis rule.
    pub fn evaluate(&mut self, neck_angle: f64, torso_angle: f64) -> bool {
        match self.state {
            PostureState::Good => {
                if neck_angle >= self.neck_threshold + self.margin
                    || torso_angle >= self.torso_threshold + self.margin
                {
                    self.state = PostureState::Bad;
                }
            }
            PostureState::Bad => {
                if neck_angle < self.neck_threshold - self.margin
                    && torso_angle < self.torso_threshold - self.margin
                {
                    self.state = PostureState::Good;
                }
            }
        }
        self.state == PostureState::Good
    }

    /// Replace the active thresholds without touching the current state.
    pub fn update_thresholds(&mut self, neck_threshold: f64, torso_threshold: f64) {
        self.neck_threshold = neck_threshold;
        self.torso_threshold = torso_threshold;
    }

    #[must_use]
    pub fn state(&self) -> PostureState {
        self.state
    }

    /// Force the state back to `Good`, e.g. for a new session.
    pub fn reset(&mut self) {
        self.state = PostureState::Good;
    }
}
