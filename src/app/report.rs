// EventSheet - app/report.rs
//
// Report writing: writability check → in-memory workbook → single
// replace of the output file.
//
// The check runs before anything is rendered or written, so a locked output
// file is never touched. The workbook is written to a sibling temp file and
// renamed over the target, so the output is either the previous file or the
// complete new workbook. A symlinked output is resolved first and the file it
// points at is replaced, keeping the link. The replaced file's permission
// bits are copied to the new one; its owner is not.

use crate::core::export;
use crate::core::model::{Classification, EventCatalog, ReportOutcome};
use crate::platform::fs as pfs;
use crate::util::error::ReportError;
use std::path::{Path, PathBuf};

/// Result of a successful report step.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub outcome: ReportOutcome,
    pub warnings: Vec<String>,
}

/// Write one worksheet per non-empty bucket to `output`.
///
/// Returns `ReportError::OutputLocked` without touching anything when the
/// existing output cannot be opened for writing.
pub fn write_report(
    classification: &Classification,
    catalog: &EventCatalog,
    output: &Path,
) -> Result<ReportResult, ReportError> {
    let plan = export::build_report(classification, catalog);

    if plan.is_empty() {
        tracing::info!("No events matched; output file not written");
        return Ok(ReportResult {
            outcome: ReportOutcome::NothingToWrite,
            warnings: plan.warnings,
        });
    }

    pfs::check_writable(output).map_err(|source| {
        tracing::warn!(path = %output.display(), error = %source, "Output file is locked");
        ReportError::OutputLocked {
            path: output.to_path_buf(),
            source,
        }
    })?;

    let bytes = export::render_workbook(&plan).map_err(|source| ReportError::Xlsx {
        path: output.to_path_buf(),
        source,
    })?;

    replace_file(output, &bytes)?;

    for warning in &plan.warnings {
        tracing::warn!(warning = %warning, "Report truncated");
    }
    tracing::info!(
        path = %output.display(),
        sheets = plan.sheets.len(),
        bytes = bytes.len(),
        "Report written"
    );

    Ok(ReportResult {
        outcome: ReportOutcome::Written {
            path: output.to_path_buf(),
            sheets: plan.sheets.len(),
        },
        warnings: plan.warnings,
    })
}

/// Write `bytes` to a temp file next to the resolved `output`, then rename
/// it into place.
fn replace_file(output: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let target = resolve_output(output);
    let permissions = std::fs::metadata(&target).ok().map(|m| m.permissions());
    let tmp = temp_sibling(&target);

    if let Err(source) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(ReportError::Io { path: tmp, source });
    }

    if let Some(permissions) = permissions {
        if let Err(source) = std::fs::set_permissions(&tmp, permissions) {
            let _ = std::fs::remove_file(&tmp);
            return Err(ReportError::Io { path: tmp, source });
        }
    }

    std::fs::rename(&tmp, &target).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        ReportError::Io {
            path: target.clone(),
            source,
        }
    })
}

/// The file a write to `output` should replace: symlinks are followed, a
/// dangling link resolves to where it points.
fn resolve_output(output: &Path) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(output) {
        return resolved;
    }
    match std::fs::read_link(output) {
        Ok(dest) if dest.is_relative() => match output.parent() {
            Some(parent) => parent.join(dest),
            None => dest,
        },
        Ok(dest) => dest,
        Err(_) => output.to_path_buf(),
    }
}

fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.xlsx".to_string());
    target.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::classify;
    use crate::core::model::EventDefinition;

    fn catalog() -> EventCatalog {
        EventCatalog::new(vec![
            EventDefinition::new("Service started"),
            EventDefinition::new("Service stopped"),
        ])
    }

    #[test]
    fn test_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("analysis_results.xlsx");
        let classification = classify(&["Service started", "Service stopped"], &catalog());
        let result = write_report(&classification, &catalog(), &out).unwrap();
        assert_eq!(
            result.outcome,
            ReportOutcome::Written {
                path: out.clone(),
                sheets: 2
            }
        );
        assert!(std::fs::read(&out).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("r.xlsx");
        write_report(&classify(&["Service started"], &catalog()), &catalog(), &out).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_nothing_matched_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("r.xlsx");
        let result = write_report(&classify(&["noise"], &catalog()), &catalog(), &out).unwrap();
        assert_eq!(result.outcome, ReportOutcome::NothingToWrite);
        assert!(!out.exists());
    }

    #[test]
    fn test_existing_output_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("r.xlsx");
        std::fs::write(&out, b"old content").unwrap();
        write_report(&classify(&["Service stopped"], &catalog()), &catalog(), &out).unwrap();
        assert_ne!(std::fs::read(&out).unwrap(), b"old content");
    }

    #[test]
    fn test_unopenable_output_is_locked_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("held.xlsx");
        std::fs::create_dir(&out).unwrap();
        let result = write_report(&classify(&["Service started"], &catalog()), &catalog(), &out);
        assert!(matches!(result, Err(ReportError::OutputLocked { .. })));
        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_output_keeps_link() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.xlsx");
        let link = dir.path().join("out.xlsx");
        std::fs::write(&real, b"old content").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_report(&classify(&["Service started"], &catalog()), &catalog(), &link).unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_link(&link).unwrap(), real);
        assert!(std::fs::read(&real).unwrap().starts_with(b"PK"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_creates_target() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("out.xlsx");
        std::os::unix::fs::symlink("report.xlsx", &link).unwrap();

        write_report(&classify(&["Service started"], &catalog()), &catalog(), &link).unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(std::fs::read(dir.path().join("report.xlsx")).unwrap().starts_with(b"PK"));
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_permissions_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("r.xlsx");
        std::fs::write(&out, b"old content").unwrap();
        std::fs::set_permissions(&out, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_report(&classify(&["Service stopped"], &catalog()), &catalog(), &out).unwrap();

        let mode = std::fs::metadata(&out).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        assert!(std::fs::read(&out).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_resolve_output_plain_path_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("new.xlsx");
        assert_eq!(resolve_output(&out), out);
    }

    #[test]
    fn test_temp_sibling_is_hidden_next_to_target() {
        let tmp = temp_sibling(Path::new("/data/out.xlsx"));
        assert_eq!(tmp.parent(), Some(Path::new("/data")));
        assert!(tmp.file_name().unwrap().to_string_lossy().starts_with(".out.xlsx."));
    }
}
