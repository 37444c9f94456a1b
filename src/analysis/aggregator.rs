//! Run orchestration: discovery, per-split accumulation, folding.
//!
//! Processing is sequential and fail-fast: an error in any split aborts
//! the whole run without producing partial output.

use crate::models::{AnalysisReport, DatasetReport, DatasetType};
use crate::scanner;
use crate::stats::accumulator;
use crate::stats::Stats;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Number of top entries to report per ranking.
    pub top_n: usize,
    /// Retain per-split summaries alongside the aggregate.
    pub per_file: bool,
    /// Split file extension (without dot).
    pub split_extension: String,
    /// Dataset names to include (empty = all), matched case-insensitively.
    pub datasets: Vec<String>,
    /// Show a progress bar over split files.
    pub show_progress: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            per_file: false,
            split_extension: "txt".to_string(),
            datasets: Vec::new(),
            show_progress: false,
        }
    }
}

/// Analyze every selected dataset under `base_dir`.
pub fn analyze(base_dir: &Path, options: &AnalyzeOptions) -> Result<AnalysisReport> {
    let datasets = scanner::discover_datasets(base_dir, &options.datasets)?;
    info!("Analyzing {} dataset(s) under {}", datasets.len(), base_dir.display());

    // List every split up front so the progress bar has a total.
    let mut work: Vec<(String, DatasetType, Vec<PathBuf>)> = Vec::new();
    for dataset in datasets {
        let dataset_dir = base_dir.join(&dataset);
        let dataset_type = DatasetType::classify(&dataset);
        let splits = scanner::split_files(&dataset_dir, &options.split_extension)?;
        debug!("{}: {} ({} split file(s))", dataset, dataset_type, splits.len());
        work.push((dataset, dataset_type, splits));
    }

    let progress = make_progress_bar(
        options.show_progress,
        work.iter().map(|(_, _, splits)| splits.len() as u64).sum(),
    );

    let mut results: AnalysisReport = BTreeMap::new();
    for (dataset, dataset_type, splits) in work {
        let mut aggregate = Stats::new();
        let mut file_summaries = BTreeMap::new();

        for path in &splits {
            if let Some(ref pb) = progress {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                pb.set_message(format!("{}/{}", dataset, name));
            }
            let stats = accumulator::process_file(path, dataset_type)?;
            if options.per_file {
                let name = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                file_summaries.insert(name, stats.summarize(options.top_n));
            }
            aggregate = aggregate.merge(stats);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        results.insert(
            dataset,
            DatasetReport {
                aggregate: aggregate.summarize(options.top_n),
                files: file_summaries,
            },
        );
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(results)
}

fn make_progress_bar(show: bool, total: u64) -> Option<ProgressBar> {
    if !show || total == 0 {
        return None;
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    Some(pb)
}
