//! `.npy` sequence sample storage and dataset loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Axis};
use ndarray_npy::{read_npy, write_npy};
use tracing::{debug, warn};

use isl_core::{FeatureVector, LabelMap, FEATURE_LEN, SEQUENCE_LEN};

use crate::error::{DatasetError, DatasetResult};

/// A loaded training dataset: one `(sequence, class index)` pair per sample.
#[derive(Debug)]
pub struct Dataset {
    /// `SEQUENCE_LEN x FEATURE_LEN` matrices, one per sample.
    pub sequences: Vec<Array2<f32>>,
    /// Class index per sample, parallel to `sequences`.
    pub classes: Vec<usize>,
    /// Index assignment derived from sorted label directory names.
    pub label_map: LabelMap,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// Persist one captured sequence under its label directory.
///
/// Writes `<root>/<label>/<label>_{id:04}.npy` as a `len x 1563` f32 matrix
/// and returns the path.
pub fn save_sequence(
    root: &Path,
    label: &str,
    sample_id: usize,
    frames: &[FeatureVector],
) -> DatasetResult<PathBuf> {
    let label_dir = root.join(label);
    std::fs::create_dir_all(&label_dir)?;

    let mut flat = Vec::with_capacity(frames.len() * FEATURE_LEN);
    for frame in frames {
        flat.extend_from_slice(frame.as_slice());
    }
    let matrix = Array2::from_shape_vec((frames.len(), FEATURE_LEN), flat)
        .expect("frame vectors have a fixed validated width");

    let path = label_dir.join(format!("{label}_{sample_id:04}.npy"));
    write_npy(&path, &matrix).map_err(|source| DatasetError::NpyWrite {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), frames = frames.len(), "saved sequence sample");
    Ok(path)
}

/// Load every sample under `root`.
///
/// Label directories are visited in sorted order and assigned contiguous
/// class indices. Samples with the wrong frame count are skipped with a
/// warning (incomplete clips); a wrong feature width is an error, since it
/// means the files were produced by an incompatible extractor configuration.
/// An empty result is fatal.
pub fn load_dataset(root: &Path) -> DatasetResult<Dataset> {
    if !root.is_dir() {
        return Err(DatasetError::RootNotFound(root.to_path_buf()));
    }

    let mut label_map = LabelMap::new();
    let mut sequences = Vec::new();
    let mut classes = Vec::new();

    for (class, label_dir) in sorted_label_dirs(root)?.into_iter().enumerate() {
        let label = label_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        label_map.insert(class, label);

        for path in sorted_npy_files(&label_dir)? {
            let matrix: Array2<f32> =
                read_npy(&path).map_err(|source| DatasetError::NpyRead {
                    path: path.clone(),
                    source,
                })?;

            if matrix.len_of(Axis(0)) != SEQUENCE_LEN {
                warn!(
                    path = %path.display(),
                    frames = matrix.len_of(Axis(0)),
                    expected = SEQUENCE_LEN,
                    "skipping incomplete clip"
                );
                continue;
            }
            if matrix.len_of(Axis(1)) != FEATURE_LEN {
                return Err(DatasetError::BadFeatureWidth {
                    path,
                    expected: FEATURE_LEN,
                    actual: matrix.len_of(Axis(1)),
                });
            }

            sequences.push(matrix);
            classes.push(class);
        }
    }

    if sequences.is_empty() {
        return Err(DatasetError::EmptyDataset(root.to_path_buf()));
    }

    debug!(
        samples = sequences.len(),
        labels = label_map.len(),
        "loaded dataset"
    );
    Ok(Dataset {
        sequences,
        classes,
        label_map,
    })
}

/// Per-label sample counts, for collection progress and dataset checks.
pub fn sample_counts(root: &Path) -> DatasetResult<BTreeMap<String, usize>> {
    if !root.is_dir() {
        return Err(DatasetError::RootNotFound(root.to_path_buf()));
    }

    let mut counts = BTreeMap::new();
    for label_dir in sorted_label_dirs(root)? {
        let label = label_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        counts.insert(label, sorted_npy_files(&label_dir)?.len());
    }
    Ok(counts)
}

fn sorted_label_dirs(root: &Path) -> DatasetResult<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn sorted_npy_files(dir: &Path) -> DatasetResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|e| e == "npy").unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
