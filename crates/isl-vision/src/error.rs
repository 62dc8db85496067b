//! Error types for vision operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur during frame decoding, detection, or inference.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("frame decode failed: {0}")]
    DecodeFailed(String),

    #[error("detection failed: {0}")]
    DetectionFailed(String),

    #[error("classification failed: {0}")]
    ClassificationFailed(String),

    #[error("window not saturated: {have}/{need} frames buffered")]
    WindowNotSaturated { have: usize, need: usize },

    #[error(transparent)]
    Feature(#[from] isl_core::FeatureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VisionError {
    /// Create a frame decode error.
    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::DecodeFailed(message.into())
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create a classification failure error.
    pub fn classification_failed(message: impl Into<String>) -> Self {
        Self::ClassificationFailed(message.into())
    }
}
