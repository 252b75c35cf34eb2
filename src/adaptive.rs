//! Rehabilitation-stage threshold adaptation.
//!
//! Classification strictness follows the patient's progress: early
//! rehabilitation gets lenient thresholds, late rehabilitation the standard
//! ones. The stage is derived out-of-band (typically daily) from recent
//! session summaries, never on the per-frame path.

use crate::constants::{
    DEFAULT_NECK_THRESHOLD, DEFAULT_TORSO_THRESHOLD, EARLY_STAGE_CEILING, MIDDLE_STAGE_CEILING,
    STAGE_HISTORY_WINDOW,
};
use crate::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse rehabilitation progress indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RehabLevel {
    Early,
    Middle,
    Late,
}

impl RehabLevel {
    /// Threshold multipliers `(neck, torso)` for this stage.
    #[must_use]
    pub const fn multipliers(self) -> (f64, f64) {
        match self {
            RehabLevel::Early => (1.5, 2.0),
            RehabLevel::Middle => (1.2, 1.5),
            RehabLevel::Late => (1.0, 1.0),
        }
    }

    /// Human-readable stage description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            RehabLevel::Early => "Early Rehabilitation (Relaxed)",
            RehabLevel::Middle => "Middle Rehabilitation (Moderate)",
            RehabLevel::Late => "Late Rehabilitation (Standard)",
        }
    }
}

impl fmt::Display for RehabLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RehabLevel::Early => "early",
            RehabLevel::Middle => "middle",
            RehabLevel::Late => "late",
        };
        f.write_str(name)
    }
}

impl FromStr for RehabLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "early" => Ok(RehabLevel::Early),
            "middle" => Ok(RehabLevel::Middle),
            "late" => Ok(RehabLevel::Late),
            other => Err(Error::InvalidInput(format!("Unknown rehabilitation stage: {other}"))),
        }
    }
}

/// One historical session summary.
///
/// Records arrive either with a precomputed good-posture percentage or as
/// raw good/bad durations; both resolve to a percentage once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryRecord {
    /// Precomputed good-posture percentage in [0, 100]
    Percentage(f64),
    /// Accumulated good/bad posture durations in seconds
    Durations { good_secs: f64, bad_secs: f64 },
}

impl HistoryRecord {
    /// Good-posture percentage for this record. A record covering no time at
    /// all counts as 0%.
    #[must_use]
    pub fn good_percentage(self) -> f64 {
        match self {
            HistoryRecord::Percentage(percentage) => percentage,
            HistoryRecord::Durations { good_secs, bad_secs } => {
                let total = good_secs + bad_secs;
                if total > 0.0 {
                    good_secs / total * 100.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Current good/bad boundary in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSet {
    pub neck: f64,
    pub torso: f64,
}

/// Derives classification thresholds from the rehabilitation stage.
///
/// Thresholds are always `base * multiplier` for the active stage; nothing
/// else mutates them. The stage changes only through [`update_stage`] and
/// [`set_stage`].
///
/// [`update_stage`]: AdaptiveThresholdController::update_stage
/// [`set_stage`]: AdaptiveThresholdController::set_stage
pub struct AdaptiveThresholdController {
    base_neck_threshold: f64,
    base_torso_threshold: f64,
    stage: RehabLevel,
}

impl AdaptiveThresholdController {
    /// Create a controller starting at the `Early` stage.
    #[must_use]
    pub fn new(base_neck_threshold: f64, base_torso_threshold: f64) -> Self {
        Self {
            base_neck_threshold,
            base_torso_threshold,
            stage: RehabLevel::Early,
        }
    }

    /// Thresholds for the active stage: base value times the stage multiplier.
    #[must_use]
    pub fn current_thresholds(&self) -> ThresholdSet {
        let (neck_mult, torso_mult) = self.stage.multipliers();
        ThresholdSet {
            neck: self.base_neck_threshold * neck_mult,
            torso: self.base_torso_threshold * torso_mult,
        }
    }

    #[must_use]
    pub fn stage(&self) -> RehabLevel {
        self.stage
    }

    /// Re-derive the stage from recent session summaries.
    ///
    /// Considers up to the most recent seven records (oldest-to-newest
    /// ordering expected) and averages their good-posture percentages:
    /// below 30% is `Early`, below 70% is `Middle`, otherwise `Late`.
    /// Empty history falls back to `Early`.
    pub fn update_stage(&mut self, history: &[HistoryRecord]) {
        let next = Self::stage_for_history(history);
        if next != self.stage {
            info!("rehabilitation stage changed: {} -> {}", self.stage, next);
        }
        self.stage = next;
    }

    /// Explicit stage override, e.g. from a clinician's assessment.
    pub fn set_stage(&mut self, stage: RehabLevel) {
        self.stage = stage;
    }

    fn stage_for_history(history: &[HistoryRecord]) -> RehabLevel {
        if history.is_empty() {
            return RehabLevel::Early;
        }

        let recent = &history[history.len().saturating_sub(STAGE_HISTORY_WINDOW)..];
        let average = recent.iter().map(|record| record.good_percentage()).sum::<f64>() / recent.len() as f64;

        if average < EARLY_STAGE_CEILING {
            RehabLevel::Early
        } else if average < MIDDLE_STAGE_CEILING {
            RehabLevel::Middle
        } else {
            RehabLevel::Late
        }
    }
}

impl Default for AdaptiveThresholdController {
    fn default() -> Self {
        Self::new(DEFAULT_NECK_THRESHOLD, DEFAULT_TORSO_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table() {
        let mut controller = AdaptiveThresholdController::new(40.0, 15.0);

        assert_eq!(controller.current_thresholds(), ThresholdSet { neck: 60.0, torso: 30.0 });

        controller.set_stage(RehabLevel::Middle);
        assert_eq!(controller.current_thresholds(), ThresholdSet { neck: 48.0, torso: 22.5 });

        controller.set_stage(RehabLevel::Late);
        assert_eq!(controller.current_thresholds(), ThresholdSet { neck: 40.0, torso: 15.0 });
    }

    #[test]
    fn test_high_performance_history_reaches_late() {
        let mut controller = AdaptiveThresholdController::new(40.0, 15.0);
        let history = vec![HistoryRecord::Percentage(80.0); 7];
        controller.update_stage(&history);
        assert_eq!(controller.stage(), RehabLevel::Late);
        assert_eq!(controller.current_thresholds(), ThresholdSet { neck: 40.0, torso: 15.0 });
    }

    #[test]
    fn test_mid_performance_history_reaches_middle() {
        let mut controller = AdaptiveThresholdController::new(40.0, 15.0);
        let history = vec![HistoryRecord::Percentage(50.0); 5];
        controller.update_stage(&history);
        assert_eq!(controller.stage(), RehabLevel::Middle);
        assert_eq!(controller.current_thresholds(), ThresholdSet { neck: 48.0, torso: 22.5 });
    }

    #[test]
    fn test_stage_boundaries() {
        let mut controller = AdaptiveThresholdController::default();

        controller.update_stage(&[HistoryRecord::Percentage(29.9)]);
        assert_eq!(controller.stage(), RehabLevel::Early);

        controller.update_stage(&[HistoryRecord::Percentage(30.0)]);
        assert_eq!(controller.stage(), RehabLevel::Middle);

        controller.update_stage(&[HistoryRecord::Percentage(69.9)]);
        assert_eq!(controller.stage(), RehabLevel::Middle);

        controller.update_stage(&[HistoryRecord::Percentage(70.0)]);
        assert_eq!(controller.stage(), RehabLevel::Late);
    }

    #[test]
    fn test_empty_history_defaults_to_early() {
        let mut controller = AdaptiveThresholdController::default();
        controller.set_stage(RehabLevel::Late);
        controller.update_stage(&[]);
        assert_eq!(controller.stage(), RehabLevel::Early);
    }

    #[test]
    fn test_only_recent_seven_records_count() {
        let mut controller = AdaptiveThresholdController::default();
        // Three poor days followed by seven strong ones: the poor days have
        // aged out of the evaluation window
        let mut history = vec![HistoryRecord::Percentage(0.0); 3];
        history.extend(vec![HistoryRecord::Percentage(90.0); 7]);
        controller.update_stage(&history);
        assert_eq!(controller.stage(), RehabLevel::Late);
    }

    #[test]
    fn test_duration_records_resolve_to_percentages() {
        let record = HistoryRecord::Durations { good_secs: 90.0, bad_secs: 210.0 };
        assert!((record.good_percentage() - 30.0).abs() < 1e-9);

        let empty = HistoryRecord::Durations { good_secs: 0.0, bad_secs: 0.0 };
        assert_eq!(empty.good_percentage(), 0.0);
    }

    #[test]
    fn test_mixed_record_kinds() {
        let mut controller = AdaptiveThresholdController::default();
        let history = [
            HistoryRecord::Percentage(80.0),
            HistoryRecord::Durations { good_secs: 240.0, bad_secs: 60.0 }, // 80%
            HistoryRecord::Percentage(80.0),
        ];
        controller.update_stage(&history);
        assert_eq!(controller.stage(), RehabLevel::Late);
    }

    #[test]
    fn test_stage_parsing() {
        assert_eq!("early".parse::<RehabLevel>().unwrap(), RehabLevel::Early);
        assert_eq!("Middle".parse::<RehabLevel>().unwrap(), RehabLevel::Middle);
        assert_eq!("LATE".parse::<RehabLevel>().unwrap(), RehabLevel::Late);
        assert!("recovered".parse::<RehabLevel>().is_err());
    }
}
