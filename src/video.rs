//! Video frame acquisition.

use crate::constants::DEFAULT_FPS;
use crate::{Error, Result};
use log::{info, warn};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use std::path::Path;

/// Sequential access to decoded video frames.
pub trait FrameSource {
    /// Frame rate used to place frame indices on the timeline.
    /// Implementations must return a positive, finite value.
    fn fps(&self) -> f64;

    /// The next decoded frame, `Ok(None)` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Mat>>;
}

/// A video file decoded through `OpenCV`.
pub struct VideoFile {
    capture: VideoCapture,
    fps: f64,
}

impl VideoFile {
    /// Opens a video file for sequential decoding.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.to_str().ok_or_else(|| {
            Error::InvalidInput(format!("Video path is not valid UTF-8: {}", path.display()))
        })?;

        info!("Opening video file: {}", path_str);
        let capture = VideoCapture::from_file(path_str, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::VideoError(format!(
                "Failed to open video: {}",
                path_str
            )));
        }

        let fps = normalize_fps(capture.get(videoio::CAP_PROP_FPS)?);

        Ok(Self { capture, fps })
    }
}

impl FrameSource for VideoFile {
    fn fps(&self) -> f64 {
        self.fps
    }

    /// A failed or empty read means the file has ended; decoders do not
    /// recover mid-file, so it is not treated as an error.
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

/// Containers sometimes report a zero or garbage frame rate; timestamps
/// still need a positive divisor.
fn normalize_fps(reported: f64) -> f64 {
    if reported.is_finite() && reported > 0.0 {
        reported
    } else {
        warn!(
            "Reported frame rate {} is unusable, assuming {}",
            reported, DEFAULT_FPS
        );
        DEFAULT_FPS
    }
}
