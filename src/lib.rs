//! Workout posture analysis library for flagging poor exercise form in video.
//!
//! This library provides a Rust implementation of workout form checking using:
//! - ONNX Runtime for pose landmark inference
//! - `OpenCV` for video decoding and image preprocessing
//!
//! The analysis pipeline consists of:
//! 1. Per-frame pose detection producing 33 body landmarks
//! 2. Visibility gating on the left-side joints the checks depend on
//! 3. Geometric form checks (forward lean, knee over toe)
//! 4. A whole-video verdict folding the evidence into one JSON report
//!
//! # Examples
//!
//! ## Analyzing a video file
//!
//! ```no_run
//! use formcheck::{app::FormCheckApp, config::Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut app = FormCheckApp::new("workout.mp4", config)?;
//! let report = app.run()?;
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Checking a single frame
//!
//! ```
//! use formcheck::analyzer::PostureAnalyzer;
//! use formcheck::config::FormConfig;
//! use formcheck::landmark::{Landmark, PoseFrame};
//!
//! // A pose with every joint at the frame center never trips a check.
//! let pose = PoseFrame::new(vec![Landmark::new(0.5, 0.5, 1.0); 33]);
//! let analyzer = PostureAnalyzer::new(FormConfig::default());
//! let issues = analyzer.analyze(0, &pose, 640, 480, 30.0);
//! assert!(issues.is_empty());
//! ```
//!
//! ## Swapping in custom frame sources and detectors
//!
//! The driver loop is generic over [`video::FrameSource`] and
//! [`detector::PoseDetector`], so recorded landmark streams or alternative
//! models can be analyzed without touching the pipeline:
//!
//! ```no_run
//! use formcheck::app::analyze_stream;
//! use formcheck::config::Config;
//! use formcheck::detector::OnnxPoseDetector;
//! use formcheck::video::VideoFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut source = VideoFile::open("workout.mp4")?;
//! let mut detector = OnnxPoseDetector::new(&config.detector)?;
//! let report = analyze_stream(&mut source, &mut detector, &config)?;
//! # Ok(())
//! # }
//! ```

/// Per-frame posture checks
pub mod analyzer;

/// Main application module
pub mod app;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Pose landmark detection backed by ONNX Runtime
pub mod detector;

/// Error types and result handling
pub mod error;

/// Pixel-space geometry for posture checks
pub mod geometry;

/// Pose landmark data model
pub mod landmark;

/// Whole-video verdict and report serialization
pub mod report;

/// Video frame acquisition
pub mod video;

/// Landmark visibility gating
pub mod visibility;

pub use error::{Error, Result};
