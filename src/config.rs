//! Configuration management for the posture classification pipeline

use crate::adaptive::RehabLevel;
use crate::constants::{DEFAULT_HYSTERESIS_MARGIN, DEFAULT_SMOOTHING_WINDOW};
use crate::pipeline::PosturePipeline;
use crate::scoring::PostureScorer;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Temporal smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Hysteresis classification configuration
    pub hysteresis: HysteresisConfig,

    /// Threshold management configuration
    pub thresholds: ThresholdConfig,

    /// Progressive scoring configuration
    pub scoring: ScoringConfig,
}

/// Temporal smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Samples held per axis in the smoothing window
    pub window_size: usize,
}

/// Hysteresis classification parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HysteresisConfig {
    /// Extra degrees beyond a threshold required to change state
    pub margin: f64,
}

/// Threshold management parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Named threshold preset
    pub profile: ThresholdProfile,

    /// Manual rehabilitation stage override; absent lets history updates
    /// drive the stage
    pub stage: Option<RehabLevel>,
}

/// Progressive scoring parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight the torso axis over the neck axis, as tuned for SCI patients
    pub sci_weighting: bool,
}

/// Named threshold presets for different patient populations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdProfile {
    /// Healthy-subject thresholds
    Standard,
    /// Lenient thresholds for early rehabilitation or severe impairment
    SciRelaxed,
    /// Tightened thresholds for late rehabilitation
    SciStrict,
}

impl ThresholdProfile {
    /// `(neck threshold, torso threshold, score threshold)` for this preset.
    #[must_use]
    pub const fn values(self) -> (f64, f64, f64) {
        match self {
            ThresholdProfile::Standard => (40.0, 15.0, 0.70),
            ThresholdProfile::SciRelaxed => (50.0, 25.0, 0.60),
            ThresholdProfile::SciStrict => (45.0, 20.0, 0.65),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            hysteresis: HysteresisConfig::default(),
            thresholds: ThresholdConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

impl Default for HysteresisConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_HYSTERESIS_MARGIN,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            profile: ThresholdProfile::Standard,
            stage: None,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { sci_weighting: false }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build a pipeline from this configuration
    pub fn build_pipeline(&self) -> Result<PosturePipeline> {
        self.validate()?;

        let (neck, torso, _) = self.thresholds.profile.values();
        let mut pipeline = PosturePipeline::new(self.smoothing.window_size, neck, torso, self.hysteresis.margin);
        if let Some(stage) = self.thresholds.stage {
            pipeline.set_stage(stage);
        }
        Ok(pipeline)
    }

    /// Build a progressive scorer from this configuration
    pub fn build_scorer(&self) -> Result<PostureScorer> {
        self.validate()?;

        let (neck, torso, score_threshold) = self.thresholds.profile.values();
        Ok(if self.scoring.sci_weighting {
            PostureScorer::new_sci(neck, torso, score_threshold)
        } else {
            PostureScorer::new(neck, torso, score_threshold)
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.smoothing.window_size == 0 {
            return Err(Error::ConfigError(
                "Smoothing window size must be greater than 0".to_string(),
            ));
        }
        if self.hysteresis.margin < 0.0 {
            return Err(Error::ConfigError(
                "Hysteresis margin must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Posture Classification Configuration

# Temporal smoothing
smoothing:
  window_size: 10

# Hysteresis classification
hysteresis:
  margin: 2.0

# Threshold management
thresholds:
  profile: standard
  stage: null

# Progressive scoring
scoring:
  sci_weighting: false
"#;
