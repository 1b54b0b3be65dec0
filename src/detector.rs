//! Pose landmark detection backed by ONNX Runtime.
//!
//! [`OnnxPoseDetector`] runs single-person BlazePose-style landmark models:
//! the first output is the landmark tensor (33 landmarks, x and y in input
//! pixel units, visibility logit at offset 3 when present) and the optional
//! second output is a pose presence score in `[0, 1]`. The ONNX session is
//! owned by the detector value and released when it is dropped.

use crate::config::DetectorConfig;
use crate::constants::{DEFAULT_MODEL_INPUT_SIZE, IMAGE_NORMALIZATION_SCALE, NUM_POSE_LANDMARKS};
use crate::landmark::{Landmark, PoseFrame};
use crate::{Error, Result};
use ndarray::{Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::sync::Arc;

/// Per-frame pose detection.
///
/// `Ok(None)` means the frame was processed but no person was found in it;
/// `Err` is reserved for inference failures.
pub trait PoseDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Option<PoseFrame>>;
}

/// Pose landmark detector using ONNX Runtime
pub struct OnnxPoseDetector {
    session: Session,
    input_size: (i32, i32),
    channels_first: bool,
    with_presence: bool,
    min_detection_confidence: f32,
}

impl OnnxPoseDetector {
    /// Create a new pose detector from the configured ONNX model file
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let environment = Arc::new(
            Environment::builder()
                .with_name("pose_landmarks")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(&config.model)?;

        let input_meta = session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelError("Model has no inputs".to_string()))?;
        let input_shape = &input_meta.dimensions;

        // Input layout from shape: [batch, 3, h, w] or [batch, h, w, 3]
        let fallback = DEFAULT_MODEL_INPUT_SIZE as u32;
        let (channels_first, input_size) = if input_shape.len() >= 4 {
            if input_shape[1] == Some(3) {
                let height = input_shape[2].unwrap_or(fallback) as i32;
                let width = input_shape[3].unwrap_or(fallback) as i32;
                (true, (width, height))
            } else {
                let height = input_shape[1].unwrap_or(fallback) as i32;
                let width = input_shape[2].unwrap_or(fallback) as i32;
                (false, (width, height))
            }
        } else {
            (false, (fallback as i32, fallback as i32))
        };

        let num_outputs = session.outputs.len();
        let with_presence = num_outputs >= 2;
        if !with_presence {
            log::warn!(
                "Model exposes {} output; pose presence will not be gated",
                num_outputs
            );
        }

        log::debug!(
            "Pose model loaded: input {}x{} ({}), {} outputs",
            input_size.0,
            input_size.1,
            if channels_first { "NCHW" } else { "NHWC" },
            num_outputs
        );

        Ok(Self {
            session,
            input_size,
            channels_first,
            with_presence,
            min_detection_confidence: config.min_detection_confidence,
        })
    }

    /// Preprocess a BGR frame for the ONNX model
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let (input_width, input_height) = self.input_size;

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(input_width, input_height),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

        let mut float_image = Mat::default();
        rgb.convert_to(
            &mut float_image,
            CV_32F,
            1.0 / f64::from(IMAGE_NORMALIZATION_SCALE),
            0.0,
        )?;

        let height = input_height as usize;
        let width = input_width as usize;
        let channels = 3;

        let mut data = vec![0.0f32; height * width * channels];
        for row in 0..height {
            for col in 0..width {
                let pixel = float_image.at_2d::<opencv::core::Vec3f>(row as i32, col as i32)?;
                for ch in 0..channels {
                    data[(row * width + col) * channels + ch] = pixel[ch];
                }
            }
        }

        let mut array = Array4::from_shape_vec((1, height, width, channels), data)
            .map_err(|e| Error::ModelError(format!("Failed to create array: {}", e)))?;

        if self.channels_first {
            array = array.permuted_axes([0, 3, 1, 2]);
        }

        Ok(array)
    }
}

impl PoseDetector for OnnxPoseDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Option<PoseFrame>> {
        let inputs = self.preprocess(frame)?;

        let cow_array = CowArray::from(inputs.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;
        let outputs = self.session.run(vec![input_tensor])?;

        let presence = if self.with_presence {
            let presence_output = outputs[1].try_extract::<f32>()?;
            let presence_view = presence_output.view();
            presence_view
                .iter()
                .copied()
                .next()
                .ok_or_else(|| Error::ModelOutputError("Presence output is empty".to_string()))?
        } else {
            1.0
        };

        if presence < self.min_detection_confidence {
            log::debug!("No pose: presence {:.3} below threshold", presence);
            return Ok(None);
        }

        let landmarks_output = outputs[0].try_extract::<f32>()?;
        let landmarks_view = landmarks_output.view();
        let values: Vec<f32> = landmarks_view.iter().copied().collect();

        parse_landmarks(&values, self.input_size).map(Some)
    }
}

/// Decodes a raw landmark tensor into a [`PoseFrame`].
///
/// The tensor must hold [`NUM_POSE_LANDMARKS`] rows of equal stride. The
/// first two values per row are x and y in input pixel units; a visibility
/// logit sits at offset 3 for strides above 3, otherwise the landmark is
/// treated as fully visible.
fn parse_landmarks(values: &[f32], input_size: (i32, i32)) -> Result<PoseFrame> {
    if values.is_empty() || values.len() % NUM_POSE_LANDMARKS != 0 {
        return Err(Error::ModelOutputError(format!(
            "Landmark tensor of {} values does not divide into {} landmarks",
            values.len(),
            NUM_POSE_LANDMARKS
        )));
    }

    let stride = values.len() / NUM_POSE_LANDMARKS;
    if stride < 2 {
        return Err(Error::ModelOutputError(format!(
            "Landmark stride {} is too small for x/y coordinates",
            stride
        )));
    }

    let (width, height) = input_size;
    let landmarks = values
        .chunks_exact(stride)
        .map(|row| {
            let x = row[0] / width as f32;
            let y = row[1] / height as f32;
            let visibility = if stride > 3 { sigmoid(row[3]) } else { 1.0 };
            Landmark::new(x, y, visibility)
        })
        .collect();

    Ok(PoseFrame::new(landmarks))
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
