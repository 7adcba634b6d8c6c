// EventSheet - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all EventSheet operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum EventSheetError {
    /// Log collection failed.
    Collect(CollectError),

    /// Report writing failed.
    Report(ReportError),
}

impl fmt::Display for EventSheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collect(e) => write!(f, "Collection error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
        }
    }
}

impl std::error::Error for EventSheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Collect(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Collect errors
// ---------------------------------------------------------------------------

/// Errors related to finding and reading log files.
#[derive(Debug)]
pub enum CollectError {
    /// The log directory does not exist.
    DirectoryNotFound { path: PathBuf },

    /// The log path exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// Walkdir traversal error on a single entry.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// I/O error opening or reading a log file.
    Io { path: PathBuf, source: io::Error },

    /// The file starts with the gzip magic but could not be decompressed.
    Gzip { path: PathBuf, source: io::Error },

    /// The file contains invalid UTF-8 and the decode policy is strict.
    InvalidEncoding {
        path: PathBuf,
        line_number: u64,
        invalid_sequences: usize,
    },
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "Log directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Log path '{}' is not a directory", path.display())
            }
            Self::Traversal { path, source } => {
                write!(f, "Error listing '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
            Self::Gzip { path, source } => {
                write!(f, "'{}': gzip decompression failed: {source}", path.display())
            }
            Self::InvalidEncoding {
                path,
                line_number,
                invalid_sequences,
            } => write!(
                f,
                "'{}': {invalid_sequences} invalid UTF-8 sequence(s), first on line {line_number}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Traversal { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Gzip { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CollectError> for EventSheetError {
    fn from(e: CollectError) -> Self {
        Self::Collect(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to writing the output spreadsheet.
#[derive(Debug)]
pub enum ReportError {
    /// The output file exists but cannot be opened for writing, usually
    /// because another program (a spreadsheet editor) holds it open.
    OutputLocked { path: PathBuf, source: io::Error },

    /// Workbook construction or serialisation failed.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// I/O error writing the output file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputLocked { path, source } => write!(
                f,
                "Output file '{}' is open in another program ({source}). \
                 Close it and run again.",
                path.display()
            ),
            Self::Xlsx { path, source } => {
                write!(f, "Workbook error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Report I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutputLocked { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ReportError> for EventSheetError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Never propagated: config problems fall back to defaults and are reported
/// as warnings built from these messages.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for EventSheet results.
pub type Result<T> = std::result::Result<T, EventSheetError>;
