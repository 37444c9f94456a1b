//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// TkgStats - descriptive statistics for temporal knowledge-graph datasets
///
/// Computes triple, entity, relation and temporal statistics over
/// tab-delimited dataset splits, plus auxiliary tools built on the same
/// engine.
///
/// Examples:
///   tkgstats stats --base-dir TemporalKGs
///   tkgstats stats --datasets icews14,wikidata --top-n 3 --per-file
///   tkgstats stats --json-output stats.json
///   tkgstats trends --output-dir figures
///   tkgstats sample-tail --dataset TemporalKGs/yago15k/train.txt --seed 42
///   tkgstats join-labels --dataset wiki_train.txt --mapping qid_labels.tsv
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tkgstats.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute dataset statistics and render text/JSON reports
    Stats(StatsArgs),
    /// Write per-dataset yearly triple-count charts
    Trends(TrendsArgs),
    /// Sample triples touching low-frequency entities
    SampleTail(SampleTailArgs),
    /// Attach entity labels to a split from a mapping file
    JoinLabels(JoinLabelsArgs),
    /// Generate a default .tkgstats.toml configuration file
    InitConfig,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatsArgs {
    /// Folder containing dataset subdirectories
    #[arg(long, default_value = "TemporalKGs", value_name = "DIR", env = "TKGSTATS_BASE_DIR")]
    pub base_dir: PathBuf,

    /// Optional subset of dataset folders to analyse (comma-separated,
    /// matched by name, case-insensitive)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub datasets: Vec<String>,

    /// Number of top entities/relations to report
    ///
    /// Defaults to the config file's `[report] top_n` (5 when unset).
    #[arg(long, value_name = "COUNT")]
    pub top_n: Option<usize>,

    /// Optional path to write the full statistics as JSON
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Include per-split summaries in the console log and JSON output
    #[arg(long)]
    pub per_file: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TrendsArgs {
    /// Folder containing dataset subdirectories
    #[arg(long, default_value = "TemporalKGs", value_name = "DIR", env = "TKGSTATS_BASE_DIR")]
    pub base_dir: PathBuf,

    /// Optional subset of dataset folders to chart (comma-separated)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub datasets: Vec<String>,

    /// Directory where charts will be written
    #[arg(long, default_value = "figures", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Maximum bar width in characters
    #[arg(long, default_value = "60", value_name = "CHARS")]
    pub width: usize,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SampleTailArgs {
    /// Path to the dataset split (tab-separated)
    #[arg(long, value_name = "FILE")]
    pub dataset: PathBuf,

    /// Maximum frequency for entities considered part of the tail
    #[arg(long, default_value = "5", value_name = "COUNT")]
    pub max_frequency: u64,

    /// Number of tail triples to sample
    #[arg(long, default_value = "10", value_name = "COUNT")]
    pub sample_size: usize,

    /// Optional random seed for reproducibility
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct JoinLabelsArgs {
    /// Path to the dataset split (tab-separated)
    #[arg(long, value_name = "FILE")]
    pub dataset: PathBuf,

    /// Two-column mapping file (entity ID, label)
    #[arg(long, value_name = "FILE")]
    pub mapping: PathBuf,

    /// Optional output path (defaults to <dataset>.labeled)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Column delimiter
    #[arg(long, default_value = "\\t", value_name = "CHAR")]
    pub delimiter: String,

    /// Placeholder when an entity is not found in the mapping
    #[arg(long, default_value = "", value_name = "TEXT")]
    pub missing_value: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            Command::Stats(args) => {
                if args.top_n == Some(0) {
                    return Err("Top-N must be at least 1".to_string());
                }
            }
            Command::Trends(args) => {
                if args.width == 0 {
                    return Err("Bar width must be at least 1".to_string());
                }
            }
            Command::SampleTail(args) => {
                if args.sample_size == 0 {
                    return Err("Sample size must be at least 1".to_string());
                }
                if !args.dataset.is_file() {
                    return Err(format!(
                        "Dataset split does not exist: {}",
                        args.dataset.display()
                    ));
                }
            }
            Command::JoinLabels(args) => {
                if !args.dataset.is_file() {
                    return Err(format!(
                        "Dataset split does not exist: {}",
                        args.dataset.display()
                    ));
                }
                if !args.mapping.is_file() {
                    return Err(format!(
                        "Mapping file does not exist: {}",
                        args.mapping.display()
                    ));
                }
            }
            Command::InitConfig => {}
        }

        Ok(())
    }

    /// Returns the log level based on the verbosity flags and the config
    /// file's `[general] verbose` default. `--quiet` wins over everything.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
