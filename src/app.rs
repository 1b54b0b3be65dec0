//! Main application module for workout form analysis.

use crate::analyzer::{PostureAnalyzer, PostureIssue};
use crate::config::Config;
use crate::detector::{OnnxPoseDetector, PoseDetector};
use crate::error::Result;
use crate::report::{resolve, FrameStats, Report};
use crate::video::{FrameSource, VideoFile};
use crate::visibility::has_sufficient_visibility;
use log::{debug, info};
use opencv::prelude::*;
use std::path::Path;

/// Runs the per-frame pipeline over a whole video and folds the evidence
/// into one [`Report`].
///
/// Frames without a detected person only advance the timeline. Detected
/// frames either pass the visibility gate and get analyzed, or are counted
/// against the video's clarity. Exhaustion of `source` ends the loop;
/// decoder and inference failures propagate and produce no report.
pub fn analyze_stream<S, D>(source: &mut S, detector: &mut D, config: &Config) -> Result<Report>
where
    S: FrameSource,
    D: PoseDetector,
{
    let analyzer = PostureAnalyzer::new(config.form.clone());
    let fps = source.fps();
    let mut stats = FrameStats::default();
    let mut issues: Vec<PostureIssue> = Vec::new();
    let mut frame_index: u64 = 0;

    while let Some(frame) = source.next_frame()? {
        if let Some(pose) = detector.detect(&frame)? {
            stats.pose_frames_detected += 1;

            if has_sufficient_visibility(&pose, &config.visibility) {
                let found = analyzer.analyze(frame_index, &pose, frame.cols(), frame.rows(), fps);
                if !found.is_empty() {
                    debug!("Frame {}: {} issue(s)", frame_index, found.len());
                }
                issues.extend(found);
            } else {
                stats.frames_missing_landmarks += 1;
                debug!("Frame {}: required joints not visible", frame_index);
            }
        }

        frame_index += 1;
    }

    info!(
        "Analyzed {} frames: {} with a pose, {} missing landmarks, {} issues",
        frame_index,
        stats.pose_frames_detected,
        stats.frames_missing_landmarks,
        issues.len()
    );

    Ok(resolve(stats, issues, &config.verdict))
}

/// The production assembly: a video file fed through the ONNX detector.
pub struct FormCheckApp {
    config: Config,
    source: VideoFile,
    detector: OnnxPoseDetector,
}

impl FormCheckApp {
    /// Opens the video and loads the pose model.
    pub fn new<P: AsRef<Path>>(video_path: P, config: Config) -> Result<Self> {
        info!("Initializing workout form analysis");
        config.validate()?;

        let source = VideoFile::open(video_path)?;
        let detector = OnnxPoseDetector::new(&config.detector)?;

        Ok(Self {
            config,
            source,
            detector,
        })
    }

    /// Analyzes the whole video. Consumes the remaining frames; the video
    /// and model resources are released when the app is dropped.
    pub fn run(&mut self) -> Result<Report> {
        analyze_stream(&mut self.source, &mut self.detector, &self.config)
    }
}
