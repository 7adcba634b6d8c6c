// EventSheet - app/collect.rs
//
// Log collection: discovery → read (gzip-aware) → decode, for every
// eligible file in one directory.
//
// All per-file errors are non-fatal: the file is skipped with a warning and
// collection continues. A missing log directory yields an empty result with
// `directory_missing` set; only unexpected errors on the directory itself
// are returned as `Err`.

use crate::core::decode;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::model::{CollectedLog, DecodePolicy, FileSummary};
use crate::platform::fs::{self as pfs, ReadFailure};
use crate::util::constants::MAX_WARNINGS;
use crate::util::error::CollectError;
use std::path::Path;

/// Settings for one collection pass.
#[derive(Debug, Clone, Default)]
pub struct CollectConfig {
    pub discovery: DiscoveryConfig,
    pub decode: DecodePolicy,
}

/// Read every line of every eligible file under `dir`, in discovery order.
pub fn collect_log_lines(dir: &Path, config: &CollectConfig) -> Result<CollectedLog, CollectError> {
    let mut collected = CollectedLog::default();

    let (files, discovery_warnings) = match discovery::discover_log_files(dir, &config.discovery) {
        Ok(found) => found,
        Err(e @ CollectError::DirectoryNotFound { .. }) | Err(e @ CollectError::NotADirectory { .. }) => {
            tracing::warn!(error = %e, "Log directory unavailable; no lines collected");
            collected.directory_missing = true;
            return Ok(collected);
        }
        Err(e) => return Err(e),
    };

    for warning in discovery_warnings {
        push_warning(&mut collected.warnings, warning);
    }

    for path in files {
        match read_file_lines(&path, config.decode) {
            Ok((lines, summary)) => {
                tracing::debug!(
                    file = %path.display(),
                    lines = summary.line_count,
                    compressed = summary.compressed,
                    invalid = summary.invalid_sequences,
                    "File read"
                );
                if summary.invalid_sequences > 0 {
                    tracing::debug!(
                        file = %path.display(),
                        invalid = summary.invalid_sequences,
                        policy = %config.decode,
                        "Invalid UTF-8 sequences handled"
                    );
                }
                collected.lines.extend(lines);
                collected.files.push(summary);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable log file");
                push_warning(&mut collected.warnings, e.to_string());
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        files = collected.files.len(),
        lines = collected.lines.len(),
        "Collection complete"
    );

    Ok(collected)
}

/// Read and decode a single file.
fn read_file_lines(path: &Path, policy: DecodePolicy) -> Result<(Vec<String>, FileSummary), CollectError> {
    let content = pfs::read_log_bytes(path).map_err(|failure| match failure {
        ReadFailure::Io(source) => CollectError::Io {
            path: path.to_path_buf(),
            source,
        },
        ReadFailure::Gzip(source) => CollectError::Gzip {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = decode::decode_lines(&content.bytes, policy).map_err(|v| CollectError::InvalidEncoding {
        path: path.to_path_buf(),
        line_number: v.line_number,
        invalid_sequences: v.invalid_sequences,
    })?;

    let summary = FileSummary {
        path: path.to_path_buf(),
        compressed: content.compressed,
        line_count: text.lines.len(),
        invalid_sequences: text.invalid_sequences,
    };
    Ok((text.lines, summary))
}

fn push_warning(warnings: &mut Vec<String>, warning: String) {
    if warnings.len() < MAX_WARNINGS {
        warnings.push(warning);
    } else if warnings.len() == MAX_WARNINGS {
        warnings.push(format!("Further warnings suppressed (limit {MAX_WARNINGS})"));
    }
}
