// EventSheet - core/discovery.rs
//
// Log file discovery inside a single directory.
//
// Reads only directory entries and file types, never file contents. Sub-
// directories are not descended. Files are returned in filesystem
// enumeration order, which is platform-dependent and not chronological.
//
// Per-entry I/O errors are non-fatal and collected as warnings.

use crate::util::constants;
use crate::util::error::CollectError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob patterns (file name only) that a file must match to be included.
    /// An empty list means "include every regular file".
    pub include_patterns: Vec<String>,

    /// Maximum number of files to return before stopping.
    pub max_files: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            max_files: constants::DEFAULT_MAX_FILES,
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// List the eligible log files directly inside `root`.
///
/// Returns `Err` only if `root` is missing or is not a directory. Entries
/// that cannot be inspected are reported in the warnings vector.
pub fn discover_log_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), CollectError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(CollectError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CollectError::DirectoryNotFound {
                path: root.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(CollectError::Io {
                path: root.to_path_buf(),
                source: e,
            })
        }
    }

    let include = compile_patterns(&config.include_patterns);
    let mut files = Vec::new();
    let mut warnings = Vec::new();
    let mut total_found = 0usize;

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let err = CollectError::Traversal { path, source: e };
                tracing::warn!(error = %err, "Skipping unreadable directory entry");
                warnings.push(err.to_string());
                continue;
            }
        };

        // walkdir does not follow links by default; resolve the target type.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !is_included(&file_name, &include) {
            tracing::trace!(file = %file_name, "Not a log file, skipping");
            continue;
        }

        total_found += 1;
        if files.len() < config.max_files {
            files.push(entry.into_path());
        }
    }

    if total_found > files.len() {
        let msg = format!(
            "Found {total_found} log files; only the first {} were read. \
             Raise [input] max_files in config to read more.",
            files.len()
        );
        tracing::warn!(total_found, max_files = config.max_files, "File limit reached");
        warnings.push(msg);
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Discovery complete");
    Ok((files, warnings))
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile glob pattern strings. Patterns that fail to compile are logged
/// and skipped.
fn compile_patterns(patterns: &[String]) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, error = %e, "Invalid include pattern, skipping");
                None
            }
        })
        .collect()
}

/// Returns true if `file_name` matches at least one include pattern.
/// An empty include list means "include all".
fn is_included(file_name: &str, include_pats: &[glob::Pattern]) -> bool {
    if include_pats.is_empty() {
        return true;
    }
    include_pats.iter().any(|p| p.matches(file_name))
}

// =============================================================================
// Tests
// =============================================================================
