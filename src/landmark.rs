//! Pose landmark data model.
//!
//! A [`PoseFrame`] holds the full 33-point body topology emitted by
//! single-person pose landmark models, indexed by [`PoseJoint`]. Coordinates
//! are normalized to the frame (`[0, 1]` on each axis); converting to pixels
//! is the job of [`crate::geometry::project`].

use crate::constants::NUM_POSE_LANDMARKS;

/// Named body joints, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseJoint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseJoint {
    /// Position of this joint in the model's landmark tensor.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One detected body landmark in normalized frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Horizontal position, 0.0 = left edge, 1.0 = right edge
    pub x: f32,
    /// Vertical position, 0.0 = top edge, 1.0 = bottom edge
    pub y: f32,
    /// Confidence that the joint is visible in the frame, in `[0, 1]`
    pub visibility: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }
}

/// All landmarks detected in a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Wraps a landmark list in model output order. Detectors are expected
    /// to supply all [`NUM_POSE_LANDMARKS`] entries; shorter lists simply
    /// make the missing joints unavailable through [`PoseFrame::get`].
    #[must_use]
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Looks up a joint, `None` when the detector did not supply it.
    #[must_use]
    pub fn get(&self, joint: PoseJoint) -> Option<&Landmark> {
        self.landmarks.get(joint.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
