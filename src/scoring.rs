//! Progressive posture scoring.
//!
//! Complements the binary classifier with a continuous score in [0, 1].
//! Angles inside their thresholds earn the full axis weight with a mild
//! taper near the boundary; angles past their thresholds lose credit on a
//! square-root curve rather than all at once.

/// Per-axis contributions to a posture score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub neck: f64,
    pub torso: f64,
}

/// Outcome of scoring one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureScore {
    /// Weighted score in [0, 1]
    pub score: f64,
    /// Whether the score clears the configured threshold
    pub is_good: bool,
    pub breakdown: ScoreBreakdown,
}

/// Weighted posture score over the two angle axes.
#[derive(Debug, Clone, Copy)]
pub struct PostureScorer {
    neck_threshold: f64,
    torso_threshold: f64,
    neck_weight: f64,
    torso_weight: f64,
    score_threshold: f64,
}

impl PostureScorer {
    /// Equal-weight scorer for general use.
    ///
    /// # Panics
    ///
    /// Panics if either angle threshold is non-positive.
    #[must_use]
    pub fn new(neck_threshold: f64, torso_threshold: f64, score_threshold: f64) -> Self {
        Self::with_weights(neck_threshold, torso_threshold, score_threshold, 0.5, 0.5)
    }

    /// SCI weighting: torso stability counts slightly more than neck position.
    #[must_use]
    pub fn new_sci(neck_threshold: f64, torso_threshold: f64, score_threshold: f64) -> Self {
        Self::with_weights(neck_threshold, torso_threshold, score_threshold, 0.45, 0.55)
    }

    fn with_weights(
        neck_threshold: f64,
        torso_threshold: f64,
        score_threshold: f64,
        neck_weight: f64,
        torso_weight: f64,
    ) -> Self {
        assert!(neck_threshold > 0.0, "Neck threshold must be positive, got {neck_threshold}");
        assert!(torso_threshold > 0.0, "Torso threshold must be positive, got {torso_threshold}");
        Self {
            neck_threshold,
            torso_threshold,
            neck_weight,
            torso_weight,
            score_threshold,
        }
    }

    /// Score one frame's angles.
    #[must_use]
    pub fn score(&self, neck_angle: f64, torso_angle: f64) -> PostureScore {
        let neck = progressive_axis_score(neck_angle, self.neck_threshold, self.neck_weight);
        let torso = progressive_axis_score(torso_angle, self.torso_threshold, self.torso_weight);
        let score = neck + torso;
        PostureScore {
            score,
            is_good: score >= self.score_threshold,
            breakdown: ScoreBreakdown { neck, torso },
        }
    }
}

/// Score one axis: full weight inside the threshold (tapering up to 15% once
/// the value passes three quarters of it), square-root decay beyond it.
fn progressive_axis_score(value: f64, threshold: f64, weight: f64) -> f64 {
    if value < threshold {
        let ratio = value / threshold;
        let bonus = if ratio < 0.75 {
            1.0
        } else {
            1.0 - ((ratio - 0.75) / 0.25) * 0.15
        };
        weight * bonus
    } else {
        let excess_ratio = (value - threshold) / threshold;
        let penalty = (excess_ratio * 1.5).sqrt().min(1.0);
        weight * (1.0 - penalty)
    }
}
