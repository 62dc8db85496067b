//! ONNX Runtime face mesh tracker.
//!
//! Wraps the MediaPipe face mesh model (468 dense landmarks) exported to
//! ONNX with named outputs:
//! - `landmarks`: `(1, 468, 3)` or `(468, 3)` normalized coordinates
//! - `score`: `(1,)` face presence probability
//!
//! No face (or a score below the threshold) is the absent state, not an
//! error.

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ort::session::Session;

use crate::error::{VisionError, VisionResult};
use crate::tensor::rgb_to_chw_tensor;

use super::{FaceDetection, FaceTracker, Point3, MIN_DETECTION_SCORE};

const INPUT_SIZE: u32 = 192;
const FACE_POINTS: usize = 468;

/// ONNX Runtime-backed face mesh tracker.
pub struct OrtFaceTracker {
    session: Mutex<Session>,
}

impl OrtFaceTracker {
    pub fn load(model_path: &Path) -> VisionResult<Self> {
        Ok(Self {
            session: super::load_session(model_path)?,
        })
    }
}

impl FaceTracker for OrtFaceTracker {
    fn detect(&self, frame: &RgbImage) -> VisionResult<Option<FaceDetection>> {
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
            // Some exports omit the score head; treat the mesh as present.
            None => 1.0,
        };
        if score < MIN_DETECTION_SCORE {
            return Ok(None);
        }

        let landmarks = outputs
            .get("landmarks")
            .ok_or_else(|| VisionError::detection_failed("face model has no `landmarks` output"))?;
        let (shape, data) = landmarks
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::detection_failed(format!("ORT extract landmarks: {e}")))?;

        // Accept (1,468,3) or (468,3).
        let valid_shape = match shape.len() {
            3 => shape[0] == 1,
            2 => true,
            _ => false,
        };
        if !valid_shape || data.len() < FACE_POINTS * 3 {
            return Err(VisionError::detection_failed(format!(
                "unexpected face mesh output shape: {shape:?}"
            )));
        }

        let points = (0..FACE_POINTS)
            .map(|i| Point3 {
                x: data[i * 3],
                y: data[i * 3 + 1],
                z: data[i * 3 + 2],
            })
            .collect();

        Ok(Some(FaceDetection { points, score }))
    }
}
