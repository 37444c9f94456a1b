//! Yearly trend charts.
//!
//! Aggregates yearly triple counts per dataset through the core
//! accumulator and writes one plain-text bar chart per dataset into an
//! output directory. Datasets without yearly information are skipped
//! with a warning.

use crate::models::DatasetType;
use crate::scanner;
use crate::stats::accumulator;
use crate::stats::freq::FreqMap;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Aggregate the yearly triple counts of every split in one dataset.
pub fn yearly_counts(
    dataset_dir: &Path,
    dataset_type: DatasetType,
    split_extension: &str,
) -> Result<FreqMap<i32>> {
    let mut counts: FreqMap<i32> = FreqMap::new();
    for path in scanner::split_files(dataset_dir, split_extension)? {
        let stats = accumulator::process_file(&path, dataset_type)?;
        counts.merge_from(&stats.year_freq);
    }
    Ok(counts)
}

/// Render yearly counts as a text bar chart, years ascending, bar lengths
/// scaled to `width` characters for the busiest year.
pub fn render_chart(dataset: &str, counts: &FreqMap<i32>, width: usize) -> String {
    let mut years: Vec<(i32, u64)> = counts.iter().map(|(y, c)| (*y, c)).collect();
    years.sort_by_key(|(year, _)| *year);

    let max_count = years.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let mut output = format!("Yearly triple counts for {}\n\n", dataset);
    for (year, count) in years {
        let bar_len = if max_count == 0 {
            0
        } else {
            ((count * width as u64 + max_count - 1) / max_count) as usize
        };
        output.push_str(&format!("{:>6}  {:<width$}  {}\n", year, "#".repeat(bar_len), count));
    }
    output
}

/// Generate one chart file per selected dataset.
pub fn run(
    base_dir: &Path,
    datasets: &[String],
    output_dir: &Path,
    split_extension: &str,
    width: usize,
) -> Result<()> {
    let targets = scanner::discover_datasets(base_dir, datasets)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    for dataset in targets {
        let dataset_dir = base_dir.join(&dataset);
        let dataset_type = DatasetType::classify(&dataset);
        let counts = yearly_counts(&dataset_dir, dataset_type, split_extension)?;
        if counts.is_empty() {
            warn!("Skipping {}: no yearly information found", dataset);
            continue;
        }
        let output_path: PathBuf = output_dir.join(format!("{}_yearly_counts.txt", dataset));
        fs::write(&output_path, render_chart(&dataset, &counts, width))
            .with_context(|| format!("Failed to write chart to {}", output_path.display()))?;
        println!("Wrote {}", output_path.display());
    }
    Ok(())
}
