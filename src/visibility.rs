//! Landmark visibility gating.
//!
//! The form checks read the left side of the body, so a frame is only worth
//! analyzing when enough of the left-side chain is actually visible. Frames
//! that fail the gate are counted, not analyzed; too many of them and the
//! whole video is rejected as unclear (see [`crate::report::resolve`]).

use crate::config::VisibilityConfig;
use crate::landmark::{PoseFrame, PoseJoint};

/// Joints the form checks depend on.
pub const REQUIRED_JOINTS: [PoseJoint; 4] = [
    PoseJoint::LeftShoulder,
    PoseJoint::LeftHip,
    PoseJoint::LeftKnee,
    PoseJoint::LeftAnkle,
];

/// Counts required joints whose visibility strictly exceeds `min_visibility`.
#[must_use]
pub fn visible_required_joints(pose: &PoseFrame, min_visibility: f32) -> usize {
    REQUIRED_JOINTS
        .iter()
        .filter(|joint| {
            pose.get(**joint)
                .map_or(false, |lm| lm.visibility > min_visibility)
        })
        .count()
}

/// Whether a detected pose is clear enough for the form checks.
///
/// The frame passes when at least `required_visible_fraction` of the
/// required joints clear the visibility threshold. With the default 0.4
/// fraction that means two of the four left-side joints.
#[must_use]
pub fn has_sufficient_visibility(pose: &PoseFrame, config: &VisibilityConfig) -> bool {
    let visible = visible_required_joints(pose, config.min_landmark_visibility);
    let needed = REQUIRED_JOINTS.len() as f64 * f64::from(config.required_visible_fraction);
    visible as f64 >= needed
}
