//! Dataset command - inspect recorded sign samples.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use isl_dataset::{load_label_map, sample_counts, LABEL_MAP_FILE};

/// Labels with fewer samples than this train poorly.
const LOW_SAMPLE_THRESHOLD: usize = 10;

/// Arguments for the dataset command
#[derive(Args)]
pub struct DatasetArgs {
    #[command(subcommand)]
    pub command: DatasetCommand,
}

/// Dataset subcommands
#[derive(Subcommand)]
pub enum DatasetCommand {
    /// Print per-label sample counts and balance warnings
    Stats {
        /// Dataset root directory (one subdirectory per label)
        #[arg(long, default_value = "dataset")]
        root: PathBuf,
    },
    /// Print the persisted label map
    Labels {
        /// Directory holding the trained model artifacts
        #[arg(long, default_value = "models")]
        model_dir: PathBuf,
    },
}

/// Run the dataset command.
pub fn run(args: &DatasetArgs) -> Result<()> {
    match &args.command {
        DatasetCommand::Stats { root } => stats(root),
        DatasetCommand::Labels { model_dir } => labels(model_dir),
    }
}

fn stats(root: &PathBuf) -> Result<()> {
    let counts = sample_counts(root)?;
    let total: usize = counts.values().sum();

    println!("=== Dataset Statistics ===");
    for (label, count) in &counts {
        let pct = if total > 0 {
            *count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!("  {label:15}: {count:4} samples ({pct:5.1}%)");
    }

    println!();
    println!("Total: {total} samples");
    println!("Classes: {}", counts.len());
    if !counts.is_empty() {
        println!("Average per class: {:.1}", total as f64 / counts.len() as f64);
    }

    for (label, count) in &counts {
        if *count == 0 {
            println!("  WARNING: label '{label}' has no samples");
        } else if *count < LOW_SAMPLE_THRESHOLD {
            println!("  WARNING: label '{label}' has only {count} samples (need {LOW_SAMPLE_THRESHOLD}+)");
        }
    }

    let max = counts.values().copied().max().unwrap_or(0);
    let min = counts.values().copied().min().unwrap_or(0);
    if counts.len() > 1 && min > 0 {
        let ratio = max as f64 / min as f64;
        println!();
        println!("Class imbalance ratio: {ratio:.1}x (max/min)");
        if ratio > 2.0 {
            println!("  WARNING: severe class imbalance, collect more data for minority classes");
        }
    }

    Ok(())
}

fn labels(model_dir: &PathBuf) -> Result<()> {
    let label_map = load_label_map(&model_dir.join(LABEL_MAP_FILE))?;
    for (idx, label) in label_map.iter() {
        println!("{idx:4}  {label}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use isl_core::{FeatureVector, LabelMap, FEATURE_LEN, SEQUENCE_LEN};
    use isl_dataset::{save_label_map, save_sequence};
    use tempfile::TempDir;

    fn frames(n: usize) -> Vec<FeatureVector> {
        (0..n)
            .map(|_| FeatureVector::from_raw(vec![0.5; FEATURE_LEN]).unwrap())
            .collect()
    }

    #[test]
    fn test_stats_on_recorded_dataset() {
        let dir = TempDir::new().unwrap();
        save_sequence(dir.path(), "hello", 0, &frames(SEQUENCE_LEN)).unwrap();
        save_sequence(dir.path(), "hello", 1, &frames(SEQUENCE_LEN)).unwrap();
        save_sequence(dir.path(), "yes", 0, &frames(SEQUENCE_LEN)).unwrap();

        assert!(stats(&dir.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_stats_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(stats(&missing).is_err());
    }

    #[test]
    fn test_labels_reads_saved_map() {
        let dir = TempDir::new().unwrap();
        let map = LabelMap::from_pairs([(0, "hello".to_string()), (1, "yes".to_string())]);
        save_label_map(dir.path(), &map).unwrap();

        assert!(labels(&dir.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_labels_missing_map_fails() {
        let dir = TempDir::new().unwrap();
        assert!(labels(&dir.path().to_path_buf()).is_err());
    }
}
