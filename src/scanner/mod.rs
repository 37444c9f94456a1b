//! Dataset and split discovery.
//!
//! Datasets are the immediate subdirectories of the base directory;
//! splits are the files with a fixed extension inside one dataset
//! directory. Both listings are sorted so every run processes the same
//! input in the same order.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Fatal discovery failures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The base directory is missing, empty, or the name filter matched
    /// nothing.
    #[error("no dataset folders found under {0}")]
    NoDatasets(PathBuf),
}

/// List dataset directory names under `base_dir`, sorted, optionally
/// filtered by a case-insensitive name set.
///
/// Fails with [`ScanError::NoDatasets`] before any split file is read
/// when the selection comes up empty.
pub fn discover_datasets(base_dir: &Path, include: &[String]) -> Result<Vec<String>> {
    if !base_dir.is_dir() {
        return Err(ScanError::NoDatasets(base_dir.to_path_buf()).into());
    }

    let entries = fs::read_dir(base_dir)
        .with_context(|| format!("Failed to read base directory: {}", base_dir.display()))?;

    let mut datasets = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read base directory: {}", base_dir.display()))?;
        if entry.path().is_dir() {
            datasets.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    datasets.sort();

    if !include.is_empty() {
        let wanted: Vec<String> = include.iter().map(|name| name.to_lowercase()).collect();
        datasets.retain(|name| wanted.contains(&name.to_lowercase()));
    }

    if datasets.is_empty() {
        return Err(ScanError::NoDatasets(base_dir.to_path_buf()).into());
    }

    debug!("Discovered {} dataset(s)", datasets.len());
    Ok(datasets)
}

/// List the split files with `extension` directly inside `dataset_dir`,
/// sorted by file name.
pub fn split_files(dataset_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dataset_dir).min_depth(1).max_depth(1) {
        let entry = entry
            .with_context(|| format!("Failed to list dataset: {}", dataset_dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
