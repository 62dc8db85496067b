//! Core types and algorithms for ISL sign recognition.
//!
//! This crate is I/O-free and holds everything the vision and serving layers
//! agree on:
//! - Per-frame landmark feature vectors and their fixed block layout
//! - Sequence windowing (streaming ring buffer and batch sliding windows)
//! - Majority-vote prediction smoothing
//! - The class-index-to-label map

pub mod feature;
pub mod labels;
pub mod smoother;
pub mod window;

pub use feature::{FeatureError, FeatureVector};
pub use labels::LabelMap;
pub use smoother::{top_prediction, Prediction, PredictionSmoother};
pub use window::{slide_windows, SequenceWindow};

/// Flattened landmarks for two hands: 2 hands x 21 points x (x, y, z).
pub const HAND_BLOCK_LEN: usize = 2 * 21 * 3;

/// Flattened face mesh landmarks: 468 points x (x, y, z).
pub const FACE_BLOCK_LEN: usize = 468 * 3;

/// Flattened upper-body pose landmarks: 11 key points x (x, y, z).
pub const POSE_BLOCK_LEN: usize = 11 * 3;

/// Total per-frame feature width: hands (126) + face (1404) + pose (33).
pub const FEATURE_LEN: usize = HAND_BLOCK_LEN + FACE_BLOCK_LEN + POSE_BLOCK_LEN;

/// Frames per classified sequence.
pub const SEQUENCE_LEN: usize = 30;

/// Default confidence threshold for accepting a prediction.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.6;
