//! Recognition service.
//!
//! Owns the detector and classifier handles plus the label map: constructed
//! once at startup from the model directory, shared by reference with every
//! handler, and dropped at shutdown. Nothing here is re-initialized
//! implicitly.

use std::path::Path;

use image::RgbImage;
use tracing::info;

use isl_core::{FeatureVector, LabelMap, SequenceWindow};
use isl_dataset::{load_label_map, LABEL_MAP_FILE};
use isl_vision::{
    LandmarkExtractor, OrtFaceTracker, OrtHandTracker, OrtPoseTracker, SignClassifier,
    VisionResult,
};

/// Model file names inside the model directory.
pub const CLASSIFIER_MODEL_FILE: &str = "isl_lstm.onnx";
pub const HAND_MODEL_FILE: &str = "hand_landmark.onnx";
pub const FACE_MODEL_FILE: &str = "face_landmark.onnx";
pub const POSE_MODEL_FILE: &str = "pose_landmark.onnx";

/// Detector, classifier, and label map behind one startup-constructed
/// handle.
pub struct RecognitionService {
    extractor: LandmarkExtractor,
    classifier: SignClassifier,
    label_map: LabelMap,
    min_confidence: f32,
}

impl RecognitionService {
    /// Load every model artifact from `model_dir`.
    pub fn load(model_dir: &Path, min_confidence: f32) -> anyhow::Result<Self> {
        let extractor = LandmarkExtractor::new(
            Box::new(OrtHandTracker::load(&model_dir.join(HAND_MODEL_FILE))?),
            Box::new(OrtFaceTracker::load(&model_dir.join(FACE_MODEL_FILE))?),
            Box::new(OrtPoseTracker::load(&model_dir.join(POSE_MODEL_FILE))?),
        );
        let classifier = SignClassifier::load(&model_dir.join(CLASSIFIER_MODEL_FILE))?;
        let label_map = load_label_map(&model_dir.join(LABEL_MAP_FILE))?;

        info!(
            model_dir = %model_dir.display(),
            labels = label_map.len(),
            "recognition service ready"
        );

        Ok(Self {
            extractor,
            classifier,
            label_map,
            min_confidence,
        })
    }

    /// Build a service from already-constructed parts (used by tests).
    pub fn from_parts(
        extractor: LandmarkExtractor,
        classifier: SignClassifier,
        label_map: LabelMap,
        min_confidence: f32,
    ) -> Self {
        Self {
            extractor,
            classifier,
            label_map,
            min_confidence,
        }
    }

    /// Extract a feature vector from a frame, or `None` without a person.
    pub fn extract(&self, frame: &RgbImage) -> VisionResult<Option<FeatureVector>> {
        self.extractor.extract(frame)
    }

    /// Class probabilities for a saturated window.
    pub fn probs_for_window(&self, window: &SequenceWindow) -> VisionResult<Vec<f32>> {
        self.classifier.predict_window(window)
    }

    /// Class probabilities for a single tiled landmark vector.
    pub fn probs_for_vector(&self, vector: &FeatureVector) -> VisionResult<Vec<f32>> {
        self.classifier.predict_tiled(vector)
    }

    pub fn label(&self, class: usize) -> &str {
        self.label_map.label_or_unknown(class)
    }

    pub fn label_map(&self) -> &LabelMap {
        &self.label_map
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }
}
