//! TkgStats - Temporal Knowledge-Graph Dataset Statistics
//!
//! A CLI tool that computes descriptive statistics over tab-delimited
//! temporal knowledge-graph splits and renders ranked text/JSON reports,
//! plus auxiliary tools (trend charts, tail sampling, label joining)
//! built on the same parsing engine.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Fatal error (configuration, discovery, I/O)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod scanner;
mod stats;
mod temporal;
mod tools;

use anyhow::{Context, Result};
use cli::{Cli, Command};
use config::Config;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed).
    if matches!(cli.command, Command::InitConfig) {
        match handle_init_config() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // The config can raise the default log level, so load it first.
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&cli, &config);

    info!("TkgStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", cli);

    match run(cli, config) {
        Ok(()) => {}
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .tkgstats.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".tkgstats.toml");

    if path.exists() {
        anyhow::bail!(".tkgstats.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .tkgstats.toml")?;

    println!("Created .tkgstats.toml with default settings.");
    Ok(())
}

/// Initialize logging based on the verbosity flags and config defaults.
fn init_logging(cli: &Cli, config: &Config) {
    let level = cli.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the selected subcommand.
fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Stats(ref args) => run_stats(&cli, config, args),
        Command::Trends(ref args) => tools::trends::run(
            &args.base_dir,
            &args.datasets,
            &args.output_dir,
            &config.scanner.split_extension,
            args.width,
        ),
        Command::SampleTail(ref args) => {
            tools::sample::run(&args.dataset, args.max_frequency, args.sample_size, args.seed)
        }
        Command::JoinLabels(ref args) => tools::labels::run(
            &args.dataset,
            &args.mapping,
            args.output.clone(),
            &args.delimiter,
            &args.missing_value,
        ),
        Command::InitConfig => unreachable!("handled before dispatch"),
    }
}

/// Run the statistics engine and render its reports.
fn run_stats(cli: &Cli, mut config: Config, args: &cli::StatsArgs) -> Result<()> {
    config.merge_with_args(args);

    let options = analysis::AnalyzeOptions {
        top_n: config.report.top_n,
        per_file: config.report.per_file,
        split_extension: config.scanner.split_extension.clone(),
        datasets: args.datasets.clone(),
        show_progress: !cli.quiet,
    };

    let results = analysis::analyze(&args.base_dir, &options)?;

    print!("{}", report::render_text(&results, options.per_file));

    if let Some(ref json_path) = args.json_output {
        report::write_json_report(&results, json_path)?;
        info!("Wrote JSON report to {}", json_path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Runs before the tracing subscriber is installed, so it stays silent.
fn load_config(cli: &Cli) -> Result<Config> {
    // Try explicit config path.
    if let Some(ref config_path) = cli.config {
        return Config::load(config_path);
    }

    // Try default location, falling back to defaults when absent.
    match Config::load_default()? {
        Some(config) => Ok(config),
        None => Ok(Config::default()),
    }
}
