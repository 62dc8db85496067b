//! Sign sequence classification.
//!
//! Wraps the trained LSTM classifier exported to ONNX: input
//! `(1, 30, 1563)` f32, output `output` of shape `(1, num_classes)`
//! softmax probabilities.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use isl_core::{FeatureVector, SequenceWindow, FEATURE_LEN, SEQUENCE_LEN};

use crate::error::{VisionError, VisionResult};
use crate::tensor::sequence_tensor;

/// ONNX Runtime wrapper for the sequence classifier.
#[derive(Debug)]
pub struct SignClassifier {
    session: Mutex<Session>,
}

impl SignClassifier {
    pub fn load(model_path: &Path) -> VisionResult<Self> {
        Ok(Self {
            session: crate::trackers::load_session(model_path).map_err(reclassify)?,
        })
    }

    /// Classify a saturated window; errors if the window is still filling.
    pub fn predict_window(&self, window: &SequenceWindow) -> VisionResult<Vec<f32>> {
        if !window.is_saturated() {
            return Err(VisionError::WindowNotSaturated {
                have: window.len(),
                need: window.capacity(),
            });
        }
        self.run_sequence(window.flattened(), window.capacity())
    }

    /// Classify a single vector by tiling it across a full window, for the
    /// one-shot landmark prediction path.
    pub fn predict_tiled(&self, vector: &FeatureVector) -> VisionResult<Vec<f32>> {
        let mut flat = Vec::with_capacity(SEQUENCE_LEN * FEATURE_LEN);
        for _ in 0..SEQUENCE_LEN {
            flat.extend_from_slice(vector.as_slice());
        }
        self.run_sequence(flat, SEQUENCE_LEN)
    }

    fn run_sequence(&self, flat: Vec<f32>, frames: usize) -> VisionResult<Vec<f32>> {
        let input = sequence_tensor(flat, frames)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| VisionError::classification_failed("ORT session poisoned"))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| VisionError::classification_failed(format!("ORT run failed: {e}")))?;

        let output = outputs
            .get("output")
            .ok_or_else(|| VisionError::classification_failed("model has no `output` tensor"))?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::classification_failed(format!("ORT extract: {e}")))?;

        // Accept (1, num_classes) or (num_classes,).
        let num_classes = match shape.len() {
            2 if shape[0] == 1 => shape[1] as usize,
            1 => shape[0] as usize,
            _ => {
                return Err(VisionError::classification_failed(format!(
                    "unexpected classifier output shape: {shape:?}"
                )))
            }
        };
        if num_classes == 0 || data.len() < num_classes {
            return Err(VisionError::classification_failed(
                "classifier returned an empty probability vector",
            ));
        }

        Ok(data[..num_classes].to_vec())
    }
}

/// Session-loading errors from the shared loader are phrased as detection
/// failures; rephrase them for the classifier path.
fn reclassify(err: VisionError) -> VisionError {
    match err {
        VisionError::DetectionFailed(msg) => VisionError::ClassificationFailed(msg),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_path() {
        let err = SignClassifier::load(Path::new("/nonexistent/model.onnx")).unwrap_err();
        assert!(matches!(err, VisionError::ModelNotFound(_)));
    }
}
