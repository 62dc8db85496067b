//! ONNX Runtime hand landmark tracker.
//!
//! Wraps a MediaPipe-style two-hand landmark model exported to ONNX with
//! named outputs:
//! - `landmarks`: `(1, 2, 21, 3)` or `(2, 21, 3)` normalized coordinates
//! - `scores`: `(1, 2)` or `(2,)` per-slot presence probability
//! - `handedness`: `(1, 2)` or `(2,)` probability the slot is a right hand
//!
//! A slot only yields a detection when its score clears
//! [`MIN_DETECTION_SCORE`](super::MIN_DETECTION_SCORE).

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ort::session::Session;

use crate::error::{VisionError, VisionResult};
use crate::tensor::rgb_to_chw_tensor;

use super::{HandDetection, HandTracker, Handedness, Point3, MIN_DETECTION_SCORE};

const INPUT_SIZE: u32 = 224;
const MAX_HANDS: usize = 2;
const POINTS_PER_HAND: usize = 21;

/// ONNX Runtime-backed hand tracker.
pub struct OrtHandTracker {
    session: Mutex<Session>,
}

impl OrtHandTracker {
    pub fn load(model_path: &Path) -> VisionResult<Self> {
        Ok(Self {
            session: super::load_session(model_path)?,
        })
    }
}

impl HandTracker for OrtHandTracker {
    fn detect(&self, frame: &RgbImage) -> VisionResult<Vec<HandDetection>> {
        let input = rgb_to_chw_tensor(frame, INPUT_SIZE)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| VisionError::detection_failed("ORT session poisoned"))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| VisionError::detection_failed(format!("ORT run failed: {e}")))?;

        let landmarks = outputs
            .get("landmarks")
            .ok_or_else(|| VisionError::detection_failed("hand model has no `landmarks` output"))?;
        let scores = outputs
            .get("scores")
            .ok_or_else(|| VisionError::detection_failed("hand model has no `scores` output"))?;
        let handedness = outputs.get("handedness");

        let (lm_shape, lm_data) = landmarks
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::detection_failed(format!("ORT extract landmarks: {e}")))?;
        let (_, score_data) = scores
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::detection_failed(format!("ORT extract scores: {e}")))?;

        // Accept (1,2,21,3) or (2,21,3).
        let per_hand = POINTS_PER_HAND * 3;
        let expected = MAX_HANDS * per_hand;
        let valid_shape = match lm_shape.len() {
            4 => lm_shape[0] == 1,
            3 => true,
            _ => false,
        };
        if !valid_shape || lm_data.len() < expected {
            return Err(VisionError::detection_failed(format!(
                "unexpected hand landmark output shape: {lm_shape:?}"
            )));
        }

        let handed_data: Vec<f32> = match handedness {
            Some(value) => {
                let (_, data) = value.try_extract_tensor::<f32>().map_err(|e| {
                    VisionError::detection_failed(format!("ORT extract handedness: {e}"))
                })?;
                data.to_vec()
            }
            None => Vec::new(),
        };

        let mut detections = Vec::with_capacity(MAX_HANDS);
        for slot in 0..MAX_HANDS {
            let score = score_data.get(slot).copied().unwrap_or(0.0);
            if score < MIN_DETECTION_SCORE {
                continue;
            }

            let base = slot * per_hand;
            let points = (0..POINTS_PER_HAND)
                .map(|i| Point3 {
                    x: lm_data[base + i * 3],
                    y: lm_data[base + i * 3 + 1],
                    z: lm_data[base + i * 3 + 2],
                })
                .collect();

            let handedness = match handed_data.get(slot) {
                Some(p) if *p >= 0.5 => Handedness::Right,
                Some(_) => Handedness::Left,
                None => Handedness::Unknown,
            };

            detections.push(HandDetection {
                points,
                handedness,
                score,
            });
        }

        Ok(detections)
    }
}
