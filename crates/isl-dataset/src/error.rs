//! Error types for dataset operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while reading or writing dataset files.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("dataset is empty: {0} (collect or convert data first)")]
    EmptyDataset(PathBuf),

    #[error("label map not found: {0}")]
    LabelMapNotFound(PathBuf),

    #[error("sample {path}: expected {expected} features per frame, got {actual}")]
    BadFeatureWidth {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("sample {path} holds no frames")]
    EmptySample { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    NpyRead {
        path: PathBuf,
        source: ndarray_npy::ReadNpyError,
    },

    #[error("failed to write {path}: {source}")]
    NpyWrite {
        path: PathBuf,
        source: ndarray_npy::WriteNpyError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
