//! Constants used throughout the application

/// Number of body landmarks in the pose topology
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Default model input size when the ONNX metadata omits dimensions
pub const DEFAULT_MODEL_INPUT_SIZE: usize = 256;

/// Image normalization scale for landmark model input
pub const IMAGE_NORMALIZATION_SCALE: f32 = 255.0;

/// Default minimum pose presence score to accept a detection
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.5;

/// Default per-landmark visibility threshold
pub const DEFAULT_MIN_LANDMARK_VISIBILITY: f32 = 0.4;

/// Default fraction of required landmarks that must be visible in a frame
pub const DEFAULT_REQUIRED_VISIBLE_FRACTION: f32 = 0.4;

/// Default minimum acceptable shoulder-hip-knee angle in degrees
pub const DEFAULT_MIN_BACK_ANGLE: f64 = 150.0;

/// Default horizontal knee-past-ankle tolerance in pixels
pub const DEFAULT_KNEE_OVER_TOE_TOLERANCE_PX: i32 = 20;

/// Default fraction of detected frames that may miss landmarks before the
/// video is rejected as too unclear to judge
pub const DEFAULT_MISSING_FRAME_FRACTION: f64 = 0.6;

/// Decimal places kept on issue timestamps
pub const TIMESTAMP_DECIMALS: u32 = 2;
