//! Sequence sample and label map persistence.
//!
//! On-disk layout:
//!
//! ```text
//! dataset/
//!   hello/
//!     hello_0000.npy      # 30 x 1563 f32
//!     hello_0001.npy
//!   thank_you/
//!     thank_you_0000.npy
//! models/
//!   label_map.json        # {"0": "hello", "1": "thank_you"}
//! ```
//!
//! Class indices are assigned by sorted label directory name, so a dataset
//! always loads with the same index assignment.

pub mod error;
pub mod label_map;
pub mod samples;

pub use error::{DatasetError, DatasetResult};
pub use label_map::{load_label_map, save_label_map, LABEL_MAP_FILE};
pub use samples::{load_dataset, sample_counts, save_sequence, Dataset};
