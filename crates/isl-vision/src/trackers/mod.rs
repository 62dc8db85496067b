//! Landmark tracker traits and shared detection types.
//!
//! Each tracker runs independently on the same frame and reports "nothing
//! detected" as an absent value, never as an error. The ONNX-backed
//! implementations live in the submodules; the traits are the seam used by
//! the extractor and by tests.

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;

use crate::error::{VisionError, VisionResult};

pub mod face;
pub mod hands;
pub mod pose;

pub use face::OrtFaceTracker;
pub use hands::OrtHandTracker;
pub use pose::OrtPoseTracker;

/// Minimum per-detection score for a tracker output to count as present.
pub const MIN_DETECTION_SCORE: f32 = 0.5;

/// Pose landmark indices kept for the upper-body block: nose, eyes, ears,
/// shoulders, elbows, wrists.
pub const UPPER_BODY_INDICES: [usize; 11] = [0, 2, 5, 7, 8, 11, 12, 13, 14, 15, 16];

/// A detected 3D keypoint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Which hand a detection belongs to, as reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    Unknown,
}

impl Handedness {
    /// Canonical slot order: left first, then right, then unlabeled.
    pub fn slot_rank(self) -> u8 {
        match self {
            Handedness::Left => 0,
            Handedness::Right => 1,
            Handedness::Unknown => 2,
        }
    }
}

/// One detected hand: 21 landmarks plus handedness and score.
#[derive(Debug, Clone)]
pub struct HandDetection {
    pub points: Vec<Point3>,
    pub handedness: Handedness,
    pub score: f32,
}

impl HandDetection {
    /// Flatten to `21 * 3` values in x, y, z order.
    pub fn flatten(&self) -> Vec<f32> {
        flatten_points(&self.points)
    }
}

/// A detected face mesh: 468 landmarks plus score.
#[derive(Debug, Clone)]
pub struct FaceDetection {
    pub points: Vec<Point3>,
    pub score: f32,
}

impl FaceDetection {
    /// Flatten to `468 * 3` values in x, y, z order.
    pub fn flatten(&self) -> Vec<f32> {
        flatten_points(&self.points)
    }
}

/// A detected body pose: the full 33 landmarks plus score.
#[derive(Debug, Clone)]
pub struct PoseDetection {
    pub points: Vec<Point3>,
    pub score: f32,
}

impl PoseDetection {
    /// Flatten only the 11 upper-body landmarks to `11 * 3` values.
    pub fn upper_body(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(UPPER_BODY_INDICES.len() * 3);
        for &idx in &UPPER_BODY_INDICES {
            let p = self.points.get(idx).copied().unwrap_or_default();
            out.extend_from_slice(&[p.x, p.y, p.z]);
        }
        out
    }
}

fn flatten_points(points: &[Point3]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        out.extend_from_slice(&[p.x, p.y, p.z]);
    }
    out
}

/// Hand landmark tracker: zero, one, or two hands per frame.
pub trait HandTracker: Send + Sync {
    fn detect(&self, frame: &RgbImage) -> VisionResult<Vec<HandDetection>>;
}

/// Face mesh tracker: at most one face per frame.
pub trait FaceTracker: Send + Sync {
    fn detect(&self, frame: &RgbImage) -> VisionResult<Option<FaceDetection>>;
}

/// Body pose tracker: at most one person per frame.
pub trait PoseTracker: Send + Sync {
    fn detect(&self, frame: &RgbImage) -> VisionResult<Option<PoseDetection>>;
}

/// Load an ONNX session from disk with the standard optimization level.
pub(crate) fn load_session(model_path: &Path) -> VisionResult<Mutex<Session>> {
    if !model_path.exists() {
        return Err(VisionError::ModelNotFound(model_path.to_path_buf()));
    }

    let model_bytes = std::fs::read(model_path)?;

    let session = Session::builder()
        .map_err(|e| VisionError::detection_failed(format!("ORT session builder: {e}")))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| VisionError::detection_failed(format!("ORT opt level: {e}")))?
        .commit_from_memory(model_bytes.as_slice())
        .map_err(|e| VisionError::detection_failed(format!("ORT load model: {e}")))?;

    Ok(Mutex::new(session))
}
