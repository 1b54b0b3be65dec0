//! Per-frame posture checks.
//!
//! Two heuristics calibrated for a side-view recording of squat-style
//! movements, both reading the left side of the body:
//!
//! - **Forward lean**: the shoulder-hip-knee sweep dropping below the
//!   configured minimum (150 degrees by default) means the back has folded
//!   toward the thighs.
//! - **Knee over toe**: the knee drifting past the ankle horizontally by
//!   more than the configured tolerance (20 px by default).
//!
//! Both checks may fire on the same frame; the back check is always
//! reported first.

use serde::Serialize;

use crate::config::FormConfig;
use crate::constants::TIMESTAMP_DECIMALS;
use crate::geometry::{angle_at_vertex, project, PixelPoint};
use crate::landmark::{PoseFrame, PoseJoint};

/// One detected form problem, anchored to a moment and a body point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostureIssue {
    /// Seconds from the start of the video, rounded to two decimals
    pub timestamp: f64,
    /// Human-readable description of the problem
    pub issue: String,
    /// Pixel location to highlight in the source frame
    pub point: PixelPoint,
}

/// Runs the form checks against single frames.
#[derive(Debug, Clone)]
pub struct PostureAnalyzer {
    config: FormConfig,
}

impl PostureAnalyzer {
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self { config }
    }

    /// Checks one frame's pose, returning all issues found.
    ///
    /// `width` and `height` are the source frame dimensions and `fps` the
    /// (positive) frame rate used to place `frame_index` on the timeline.
    /// A pose missing any required joint produces no issues.
    #[must_use]
    pub fn analyze(
        &self,
        frame_index: u64,
        pose: &PoseFrame,
        width: i32,
        height: i32,
        fps: f64,
    ) -> Vec<PostureIssue> {
        let (Some(shoulder), Some(hip), Some(knee), Some(ankle)) = (
            pose.get(PoseJoint::LeftShoulder),
            pose.get(PoseJoint::LeftHip),
            pose.get(PoseJoint::LeftKnee),
            pose.get(PoseJoint::LeftAnkle),
        ) else {
            return Vec::new();
        };

        let shoulder = project(shoulder, width, height);
        let hip = project(hip, width, height);
        let knee = project(knee, width, height);
        let ankle = project(ankle, width, height);

        let timestamp = round_timestamp(frame_index as f64 / fps);
        let mut issues = Vec::new();

        let back_angle = angle_at_vertex(shoulder, hip, knee);
        if back_angle < self.config.min_back_angle {
            issues.push(PostureIssue {
                timestamp,
                issue: format!(
                    "Back angle < {}° ({}°)",
                    self.config.min_back_angle as i32, back_angle as i32
                ),
                point: hip,
            });
        }

        if knee.x > ankle.x + self.config.knee_over_toe_tolerance_px {
            issues.push(PostureIssue {
                timestamp,
                issue: "Knee over toe".to_string(),
                point: knee,
            });
        }

        issues
    }
}

fn round_timestamp(seconds: f64) -> f64 {
    let factor = 10f64.powi(TIMESTAMP_DECIMALS as i32);
    (seconds * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_POSE_LANDMARKS;
    use crate::landmark::Landmark;

    const WIDTH: i32 = 640;
    const HEIGHT: i32 = 480;
    const FPS: f64 = 30.0;

    /// Upright side view: shoulder stacked over hip, knee and ankle
    /// stacked below. All coordinates are exact binary fractions so the
    /// projected pixels are deterministic.
    fn upright_pose() -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 1.0); NUM_POSE_LANDMARKS];
        landmarks[PoseJoint::LeftShoulder.index()] = Landmark::new(0.5, 0.0, 1.0);
        landmarks[PoseJoint::LeftHip.index()] = Landmark::new(0.5, 0.5, 1.0);
        landmarks[PoseJoint::LeftKnee.index()] = Landmark::new(0.5, 0.75, 1.0);
        landmarks[PoseJoint::LeftAnkle.index()] = Landmark::new(0.5, 0.875, 1.0);
        landmarks
    }

    fn set(landmarks: &mut [Landmark], joint: PoseJoint, x: f32, y: f32) {
        landmarks[joint.index()] = Landmark::new(x, y, 1.0);
    }

    fn analyzer() -> PostureAnalyzer {
        PostureAnalyzer::new(FormConfig::default())
    }

    #[test]
    fn upright_pose_is_clean() {
        let pose = PoseFrame::new(upright_pose());
        let issues = analyzer().analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert!(issues.is_empty());
    }

    #[test]
    fn folded_back_reports_angle_at_hip() {
        let mut landmarks = upright_pose();
        // Knee out to (395, 360): shoulder-hip-knee sweep is about 148,
        // ankle at the same x so the knee check stays quiet.
        set(&mut landmarks, PoseJoint::LeftKnee, 0.6171875, 0.75);
        set(&mut landmarks, PoseJoint::LeftAnkle, 0.6171875, 0.875);
        let pose = PoseFrame::new(landmarks);

        let issues = analyzer().analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, "Back angle < 150° (147°)");
        assert_eq!(issues[0].point, PixelPoint::new(320, 240));
    }

    #[test]
    fn knee_past_ankle_reports_at_knee() {
        let mut landmarks = upright_pose();
        // Knee at x = 345, ankle at x = 320: 5 px past the 20 px tolerance.
        // The shoulder-hip-knee sweep stays near 168, above the back limit.
        set(&mut landmarks, PoseJoint::LeftKnee, 0.5390625, 0.75);
        let pose = PoseFrame::new(landmarks);

        let issues = analyzer().analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, "Knee over toe");
        assert_eq!(issues[0].point, PixelPoint::new(345, 360));
    }

    #[test]
    fn knee_exactly_at_tolerance_is_clean() {
        let mut landmarks = upright_pose();
        // Knee at x = 340, exactly ankle + 20: strict comparison, no issue.
        set(&mut landmarks, PoseJoint::LeftKnee, 0.53125, 0.75);
        let pose = PoseFrame::new(landmarks);

        let issues = analyzer().analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert!(issues.is_empty());
    }

    #[test]
    fn both_issues_in_one_frame_keep_back_first() {
        let mut landmarks = upright_pose();
        set(&mut landmarks, PoseJoint::LeftKnee, 0.6171875, 0.75);
        let pose = PoseFrame::new(landmarks);

        let issues = analyzer().analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].issue.starts_with("Back angle"));
        assert_eq!(issues[1].issue, "Knee over toe");
        assert_eq!(issues[0].timestamp, issues[1].timestamp);
    }

    #[test]
    fn timestamps_come_from_frame_index_and_fps() {
        let mut landmarks = upright_pose();
        set(&mut landmarks, PoseJoint::LeftKnee, 0.5390625, 0.75);
        let pose = PoseFrame::new(landmarks);
        let analyzer = analyzer();

        let issues = analyzer.analyze(30, &pose, WIDTH, HEIGHT, FPS);
        assert_eq!(issues[0].timestamp, 1.0);

        let issues = analyzer.analyze(8, &pose, WIDTH, HEIGHT, FPS);
        assert_eq!(issues[0].timestamp, 0.27);

        let issues = analyzer.analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert_eq!(issues[0].timestamp, 0.0);
    }

    #[test]
    fn missing_required_joint_produces_no_issues() {
        let pose = PoseFrame::new(vec![Landmark::new(0.9, 0.5, 1.0); 12]);
        let issues = analyzer().analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert!(issues.is_empty());
    }

    #[test]
    fn lowered_angle_threshold_changes_the_message() {
        let config = FormConfig {
            min_back_angle: 120.0,
            ..FormConfig::default()
        };
        let mut landmarks = upright_pose();
        set(&mut landmarks, PoseJoint::LeftKnee, 0.6171875, 0.75);
        set(&mut landmarks, PoseJoint::LeftAnkle, 0.6171875, 0.875);
        let pose = PoseFrame::new(landmarks);

        // 148-degree sweep clears a 120-degree minimum.
        let issues = PostureAnalyzer::new(config).analyze(0, &pose, WIDTH, HEIGHT, FPS);
        assert!(issues.is_empty());
    }
}
