//! Configuration management for the posture analysis application
//!
//! Every tunable the pipeline consults lives here with its calibrated
//! default, so a plain `Config::default()` reproduces the published
//! behavior and a YAML file can override any subset of knobs.

use crate::constants::{
    DEFAULT_KNEE_OVER_TOE_TOLERANCE_PX, DEFAULT_MIN_BACK_ANGLE, DEFAULT_MIN_DETECTION_CONFIDENCE,
    DEFAULT_MIN_LANDMARK_VISIBILITY, DEFAULT_MISSING_FRAME_FRACTION,
    DEFAULT_REQUIRED_VISIBLE_FRACTION,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pose detector configuration
    pub detector: DetectorConfig,

    /// Landmark visibility gating configuration
    pub visibility: VisibilityConfig,

    /// Form check thresholds
    pub form: FormConfig,

    /// Whole-video verdict configuration
    pub verdict: VerdictConfig,
}

/// Pose detector parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Path to the pose landmark ONNX model
    pub model: PathBuf,

    /// Minimum pose presence score to count a frame as detected (0.0-1.0)
    pub min_detection_confidence: f32,
}

/// Landmark visibility gating parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Per-landmark visibility a required joint must exceed (0.0-1.0)
    pub min_landmark_visibility: f32,

    /// Fraction of required joints that must be visible for a frame to be
    /// analyzable (0.0-1.0)
    pub required_visible_fraction: f32,
}

/// Form check thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Minimum acceptable shoulder-hip-knee angle in degrees
    pub min_back_angle: f64,

    /// How far the knee may sit past the ankle horizontally, in pixels
    pub knee_over_toe_tolerance_px: i32,
}

/// Whole-video verdict parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictConfig {
    /// Fraction of detected frames allowed to miss landmarks before the
    /// video is rejected as unclear (0.0-1.0)
    pub missing_frame_fraction: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            visibility: VisibilityConfig::default(),
            form: FormConfig::default(),
            verdict: VerdictConfig::default(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/pose_landmarks.onnx"),
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
        }
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            min_landmark_visibility: DEFAULT_MIN_LANDMARK_VISIBILITY,
            required_visible_fraction: DEFAULT_REQUIRED_VISIBLE_FRACTION,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_back_angle: DEFAULT_MIN_BACK_ANGLE,
            knee_over_toe_tolerance_px: DEFAULT_KNEE_OVER_TOE_TOLERANCE_PX,
        }
    }
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            missing_frame_fraction: DEFAULT_MISSING_FRAME_FRACTION,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.detector.min_detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility.min_landmark_visibility) {
            return Err(Error::ConfigError(
                "Landmark visibility threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility.required_visible_fraction) {
            return Err(Error::ConfigError(
                "Required visible fraction must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..360.0).contains(&self.form.min_back_angle) {
            return Err(Error::ConfigError(
                "Minimum back angle must be between 0 and 360 degrees".to_string(),
            ));
        }
        if self.form.knee_over_toe_tolerance_px < 0 {
            return Err(Error::ConfigError(
                "Knee-over-toe tolerance must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.verdict.missing_frame_fraction) {
            return Err(Error::ConfigError(
                "Missing frame fraction must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Workout Form Check Configuration

# Pose detector
detector:
  model: "assets/pose_landmarks.onnx"
  min_detection_confidence: 0.5

# Landmark visibility gating
visibility:
  min_landmark_visibility: 0.4
  required_visible_fraction: 0.4

# Form check thresholds
form:
  min_back_angle: 150.0
  knee_over_toe_tolerance_px: 20

# Whole-video verdict
verdict:
  missing_frame_fraction: 0.6
"#;
