// EventSheet - app/pipeline.rs
//
// One-shot run: collect → classify → write.
//
// Single-threaded and synchronous. Progress is reported through a caller
// supplied callback (the binary prints it; tests record it). A lock conflict
// on the output file ends the write step only and is reported as
// `ReportOutcome::Locked`; unexpected errors propagate.

use crate::app::collect::{self, CollectConfig};
use crate::app::report;
use crate::core::classify;
use crate::core::discovery::DiscoveryConfig;
use crate::core::model::{EventCatalog, ReportOutcome, RunProgress, RunSummary};
use crate::platform::config::AppConfig;
use crate::util::error::{ReportError, Result};

impl From<&AppConfig> for CollectConfig {
    fn from(config: &AppConfig) -> Self {
        CollectConfig {
            discovery: DiscoveryConfig {
                include_patterns: config.include_patterns.clone(),
                max_files: config.max_files,
            },
            decode: config.decode,
        }
    }
}

/// Execute a full run against `catalog` using `config`.
pub fn run<F>(config: &AppConfig, catalog: &EventCatalog, mut on_progress: F) -> Result<RunSummary>
where
    F: FnMut(&RunProgress),
{
    on_progress(&RunProgress::Started {
        log_dir: config.log_dir.clone(),
    });

    // -------------------------------------------------------------------------
    // Phase 1: Collection
    // -------------------------------------------------------------------------
    let collected = collect::collect_log_lines(&config.log_dir, &CollectConfig::from(config))?;

    if collected.directory_missing {
        on_progress(&RunProgress::DirectoryMissing {
            path: config.log_dir.clone(),
        });
    }
    for warning in &collected.warnings {
        on_progress(&RunProgress::Warning {
            message: warning.clone(),
        });
    }
    on_progress(&RunProgress::LinesCollected {
        lines: collected.lines.len(),
        files: collected.files.len(),
    });

    // -------------------------------------------------------------------------
    // Phase 2: Classification
    // -------------------------------------------------------------------------
    let classification = classify::classify(&collected.lines, catalog);
    let matches = classification.total_matches();
    on_progress(&RunProgress::Classified {
        matches,
        events: classification.non_empty().count(),
    });

    // -------------------------------------------------------------------------
    // Phase 3: Report
    // -------------------------------------------------------------------------
    let mut warnings = collected.warnings;
    let outcome = match report::write_report(&classification, catalog, &config.output_file) {
        Ok(result) => {
            for warning in &result.warnings {
                on_progress(&RunProgress::Warning {
                    message: warning.clone(),
                });
            }
            warnings.extend(result.warnings);
            result.outcome
        }
        Err(ReportError::OutputLocked { path, .. }) => ReportOutcome::Locked { path },
        Err(e) => return Err(e.into()),
    };

    on_progress(&match &outcome {
        ReportOutcome::Written { path, sheets } => RunProgress::ReportWritten {
            path: path.clone(),
            sheets: *sheets,
        },
        ReportOutcome::NothingToWrite => RunProgress::NothingToWrite,
        ReportOutcome::Locked { path } => RunProgress::OutputLocked { path: path.clone() },
    });

    Ok(RunSummary {
        lines_collected: collected.lines.len(),
        files_read: collected.files.len(),
        matches,
        warnings,
        outcome,
    })
}
