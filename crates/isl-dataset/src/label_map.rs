//! Label map side file.
//!
//! The trained model is useless without its index-to-label assignment, so
//! the map is written as `label_map.json` next to the model artifact.

use std::path::{Path, PathBuf};

use tracing::info;

use isl_core::LabelMap;

use crate::error::{DatasetError, DatasetResult};

/// File name of the label map side file inside the model directory.
pub const LABEL_MAP_FILE: &str = "label_map.json";

/// Write the label map into `model_dir`, creating the directory if needed.
pub fn save_label_map(model_dir: &Path, label_map: &LabelMap) -> DatasetResult<PathBuf> {
    std::fs::create_dir_all(model_dir)?;
    let path = model_dir.join(LABEL_MAP_FILE);
    let json = serde_json::to_string_pretty(label_map)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), labels = label_map.len(), "saved label map");
    Ok(path)
}

/// Load a label map from an explicit file path.
pub fn load_label_map(path: &Path) -> DatasetResult<LabelMap> {
    if !path.is_file() {
        return Err(DatasetError::LabelMapNotFound(path.to_path_buf()));
    }
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
