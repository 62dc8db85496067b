//! ONNX Runtime body pose tracker.
//!
//! Wraps a MediaPipe-style pose landmark model (33 full-body points)
//! exported to ONNX with named outputs:
//! - `landmarks`: `(1, 33, 3)` or `(33, 3)` normalized coordinates
//! - `score`: `(1,)` person presence probability
//!
//! Pose is the load-bearing presence signal for the whole pipeline: the
//! extractor drops a frame entirely when this tracker reports nothing.

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ort::session::Session;

use crate::error::{VisionError, VisionResult};
use crate::tensor::rgb_to_chw_tensor;

use super::{Point3, PoseDetection, PoseTracker, MIN_DETECTION_SCORE};

const INPUT_SIZE: u32 = 256;
const POSE_POINTS: usize = 33;

/// ONNX Runtime-backed pose tracker.
pub struct OrtPoseTracker {
    session: Mutex<Session>,
}

impl OrtPoseTracker {
    pub fn load(model_path: &Path) -> VisionResult<Self> {
        Ok(Self {
            session: super::load_session(model_path)?,
        })
    }
}

impl PoseTracker for OrtPoseTracker {
    fn detect(&self, frame: &RgbImage) -> VisionResult<Option<PoseDetection>> {
        let input = rgb_to_chw_tensor(frame, INPUT_SIZE)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| VisionError::detection_failed("ORT session poisoned"))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| VisionError::detection_failed(format!("ORT run failed: {e}")))?;

        let score = match outputs.get("score") {
            Some(value) => {
                let (_, data) = value.try_extract_tensor::<f32>().map_err(|e| {
                    VisionError::detection_failed(format!("ORT extract score: {e}"))
                })?;
                data.first().copied().unwrap_or(0.0)
            }
            None => 1.0,
        };
        if score < MIN_DETECTION_SCORE {
            return Ok(None);
        }

        let landmarks = outputs
            .get("landmarks")
            .ok_or_else(|| VisionError::detection_failed("pose model has no `landmarks` output"))?;
        let (shape, data) = landmarks
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::detection_failed(format!("ORT extract landmarks: {e}")))?;

        // Accept (1,33,3) or (33,3).
        let valid_shape = match shape.len() {
            3 => shape[0] == 1,
            2 => true,
            _ => false,
        };
        if !valid_shape || data.len() < POSE_POINTS * 3 {
            return Err(VisionError::detection_failed(format!(
                "unexpected pose output shape: {shape:?}"
            )));
        }

        let points = (0..POSE_POINTS)
            .map(|i| Point3 {
                x: data[i * 3],
                y: data[i * 3 + 1],
                z: data[i * 3 + 2],
            })
            .collect();

        Ok(Some(PoseDetection { points, score }))
    }
}
