// EventSheet - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml + CLI overrides)
// 3. Logging initialisation (debug mode support)
// 4. A single collect → classify → write run
//
// With no arguments the run reads ./logs and writes ./analysis_results.xlsx.

use clap::Parser;
use eventsheet::app::pipeline;
use eventsheet::core::model::{DecodePolicy, EventCatalog, ReportOutcome, RunProgress};
use eventsheet::platform::config::{self, PlatformPaths};
use eventsheet::util;
use std::path::PathBuf;
use std::process::ExitCode;

/// EventSheet - scan log files for known events and export them to a spreadsheet.
///
/// Every `.log` and `.gz` file in the log directory is read; each known event
/// phrase gets its own worksheet listing the matching lines, newest first.
#[derive(Parser, Debug)]
#[command(name = "EventSheet", version, about)]
struct Cli {
    /// Directory holding the log files (default: ./logs).
    #[arg(short = 'l', long = "log-dir")]
    log_dir: Option<PathBuf>,

    /// Spreadsheet to write (default: ./analysis_results.xlsx).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Configuration file (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Handling of invalid UTF-8: drop, replace or strict.
    #[arg(long = "decode")]
    decode: Option<DecodePolicy>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config_path, explicit) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (PlatformPaths::resolve().config_file(), false),
    };
    let (mut app_config, config_warnings) = config::load_config(&config_path, explicit);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "EventSheet starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // CLI > config file > defaults
    if let Some(dir) = cli.log_dir {
        app_config.log_dir = dir;
    }
    if let Some(out) = cli.output {
        app_config.output_file = out;
    }
    if let Some(policy) = cli.decode {
        app_config.decode = policy;
    }

    let catalog = EventCatalog::builtin();

    match pipeline::run(&app_config, &catalog, print_progress) {
        Ok(summary) => {
            tracing::info!(
                lines = summary.lines_collected,
                files = summary.files_read,
                matches = summary.matches,
                warnings = summary.warnings.len(),
                "Run finished"
            );
            match summary.outcome {
                ReportOutcome::Locked { .. } => ExitCode::FAILURE,
                ReportOutcome::Written { .. } | ReportOutcome::NothingToWrite => ExitCode::SUCCESS,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Console messages for the operator.
fn print_progress(progress: &RunProgress) {
    match progress {
        RunProgress::Started { log_dir } => {
            println!("Starting log analysis in '{}'...", log_dir.display());
        }
        RunProgress::DirectoryMissing { path } => {
            println!("Log directory not found: {}", path.display());
        }
        RunProgress::LinesCollected { lines, files } => {
            println!("Found {lines} log lines in {files} file(s)");
        }
        RunProgress::Warning { message } => {
            println!("Warning: {message}");
        }
        RunProgress::Classified { matches, events } => {
            tracing::debug!(matches, events, "Classification done");
        }
        RunProgress::ReportWritten { path, sheets } => {
            println!("{} created successfully ({sheets} sheet(s))", path.display());
        }
        RunProgress::NothingToWrite => {
            println!("No known events found; no spreadsheet written");
        }
        RunProgress::OutputLocked { path } => {
            println!(
                "The spreadsheet '{}' is open in another program. Close it and try again.",
                path.display()
            );
        }
    }
}
