//! Whole-video verdict and the report printed for consumers.
//!
//! Downstream services parse the single JSON line this module produces and
//! surface `message` strings directly to end users, so both the field
//! layout and the message wording are frozen contracts.

use serde::Serialize;

use crate::analyzer::PostureIssue;
use crate::config::VerdictConfig;
use crate::Result;

/// Shown when no frame contained a detectable person.
pub const NO_HUMAN_MESSAGE: &str =
    "No human detected. Please upload a workout video with clear side view.";

/// Shown when too many detected frames had the required joints obscured.
pub const LOW_VISIBILITY_MESSAGE: &str =
    "Key body parts not visible in most frames. Please upload a clearer video showing full body from the side.";

/// Shown when analysis ran but produced no findings. A fully clean
/// performance and a genuine failure are indistinguishable here; consumers
/// rely on this exact wording, so the ambiguity is kept rather than fixed.
pub const NO_FINDINGS_MESSAGE: &str =
    "Something went wrong during analysis. Try again with a better video.";

/// Frame-quality counters accumulated by the driver loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames in which a person was detected
    pub pose_frames_detected: u64,
    /// Detected frames that failed the visibility gate
    pub frames_missing_landmarks: u64,
}

/// The one report emitted per analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    /// The video could not be judged; `message` says why.
    Error { message: String },
    /// Analysis completed with findings, in frame order.
    Success { bad_postures: Vec<PostureIssue> },
}

impl Report {
    /// Renders the single-line JSON document consumers parse.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Folds the video-level evidence into the final report.
///
/// Branches are checked in order, first match wins:
/// 1. no person ever detected,
/// 2. missing-landmark frames outnumber `missing_frame_fraction` of the
///    detected frames (strictly greater),
/// 3. at least one issue found,
/// 4. nothing found (see [`NO_FINDINGS_MESSAGE`]).
#[must_use]
pub fn resolve(stats: FrameStats, issues: Vec<PostureIssue>, config: &VerdictConfig) -> Report {
    if stats.pose_frames_detected == 0 {
        return Report::Error {
            message: NO_HUMAN_MESSAGE.to_string(),
        };
    }

    let missing = stats.frames_missing_landmarks as f64;
    let allowed = stats.pose_frames_detected as f64 * config.missing_frame_fraction;
    if missing > allowed {
        return Report::Error {
            message: LOW_VISIBILITY_MESSAGE.to_string(),
        };
    }

    if !issues.is_empty() {
        return Report::Success {
            bad_postures: issues,
        };
    }

    Report::Error {
        message: NO_FINDINGS_MESSAGE.to_string(),
    }
}
