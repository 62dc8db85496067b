//! Landmark extraction and sign classification.
//!
//! The pipeline is: decode a frame, run three independent landmark trackers
//! (hands, face mesh, upper-body pose) on it, fuse their outputs into one
//! fixed-width feature vector, and classify saturated windows of those
//! vectors with an LSTM exported to ONNX.
//!
//! Trackers are trait objects so tests (and alternative model backends) can
//! substitute the ONNX Runtime implementations.

pub mod classify;
pub mod error;
pub mod extractor;
pub mod frame;
pub mod tensor;
pub mod trackers;

pub use classify::SignClassifier;
pub use error::{VisionError, VisionResult};
pub use extractor::LandmarkExtractor;
pub use frame::decode_base64_frame;
pub use trackers::{
    FaceDetection, FaceTracker, HandDetection, Handedness, HandTracker, OrtFaceTracker,
    OrtHandTracker, OrtPoseTracker, Point3, PoseDetection, PoseTracker,
};
