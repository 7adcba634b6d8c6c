// EventSheet - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies.
//
// These types are the shared vocabulary across all layers.

use std::path::PathBuf;

// =============================================================================
// Event definitions
// =============================================================================

/// A named phrase searched for verbatim within each log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    /// Display name, also used as the worksheet column header.
    pub name: String,

    /// Case-sensitive phrase that must occur somewhere in the line.
    pub phrase: String,

    /// Short worksheet label. `None` means "use `name`".
    pub sheet_label: Option<String>,
}

impl EventDefinition {
    /// Definition whose phrase is identical to its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            phrase: name.clone(),
            name,
            sheet_label: None,
        }
    }

    /// Builder-style override of the match phrase.
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = phrase.into();
        self
    }

    /// Builder-style short worksheet label.
    pub fn with_sheet_label(mut self, label: impl Into<String>) -> Self {
        self.sheet_label = Some(label.into());
        self
    }

    /// Label the worksheet should carry before sanitising.
    pub fn sheet_label(&self) -> &str {
        self.sheet_label.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered set of event definitions. Catalog order is worksheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCatalog {
    definitions: Vec<EventDefinition>,
}

impl EventCatalog {
    pub fn new(definitions: Vec<EventDefinition>) -> Self {
        Self { definitions }
    }

    pub fn definitions(&self) -> &[EventDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Look up a definition by event name.
    pub fn get(&self, name: &str) -> Option<&EventDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Matched lines for one event definition, newest-inserted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Event name (the definition's `name`).
    pub event: String,

    /// Trimmed matching lines. The last line read is at index 0.
    pub lines: Vec<String>,
}

/// Result of classifying a run's lines against a catalog.
///
/// Holds exactly one bucket per catalog definition, in catalog order, even
/// when a bucket is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub buckets: Vec<Bucket>,
}

impl Classification {
    /// Lines matched for `event`, or `None` if the event is not in the catalog.
    pub fn get(&self, event: &str) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|b| b.event == event)
            .map(|b| b.lines.as_slice())
    }

    /// Buckets holding at least one line, in catalog order.
    pub fn non_empty(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter().filter(|b| !b.lines.is_empty())
    }

    /// Sum of bucket sizes. A line matching two events counts twice.
    pub fn total_matches(&self) -> usize {
        self.buckets.iter().map(|b| b.lines.len()).sum()
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// How bytes that are not valid UTF-8 are treated when reading a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Remove invalid byte sequences.
    #[default]
    Drop,
    /// Replace each invalid byte sequence with U+FFFD.
    Replace,
    /// Reject the whole file.
    Strict,
}

impl DecodePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            DecodePolicy::Drop => "drop",
            DecodePolicy::Replace => "replace",
            DecodePolicy::Strict => "strict",
        }
    }
}

impl std::fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" | "ignore" => Ok(DecodePolicy::Drop),
            "replace" => Ok(DecodePolicy::Replace),
            "strict" => Ok(DecodePolicy::Strict),
            other => Err(format!(
                "unknown decode policy \"{other}\" (expected drop, replace or strict)"
            )),
        }
    }
}

// =============================================================================
// Collection
// =============================================================================

/// Per-file read statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// File path.
    pub path: PathBuf,

    /// Whether the content was gzip-decompressed.
    pub compressed: bool,

    /// Number of lines contributed to the run.
    pub line_count: usize,

    /// Invalid UTF-8 sequences dropped or replaced.
    pub invalid_sequences: usize,
}

/// Every line read in a run, in file enumeration order.
#[derive(Debug, Clone, Default)]
pub struct CollectedLog {
    /// Raw lines, concatenated across files.
    pub lines: Vec<String>,

    /// Files that were read successfully.
    pub files: Vec<FileSummary>,

    /// Non-fatal problems (unreadable files, truncation).
    pub warnings: Vec<String>,

    /// The log directory was missing (or not a directory); nothing was read.
    pub directory_missing: bool,
}

// =============================================================================
// Run outcome
// =============================================================================

/// What the report step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The workbook was written.
    Written { path: PathBuf, sheets: usize },

    /// No bucket had any lines; no file was touched.
    NothingToWrite,

    /// The output file was held by another process; nothing was written.
    Locked { path: PathBuf },
}

/// Progress messages emitted while a run executes, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunProgress {
    /// The run started.
    Started { log_dir: PathBuf },

    /// The log directory does not exist; the run continues with no lines.
    DirectoryMissing { path: PathBuf },

    /// Collection finished.
    LinesCollected { lines: usize, files: usize },

    /// A non-fatal warning occurred.
    Warning { message: String },

    /// Classification finished.
    Classified { matches: usize, events: usize },

    /// The workbook was written.
    ReportWritten { path: PathBuf, sheets: usize },

    /// No events matched; nothing was written.
    NothingToWrite,

    /// The output file is open elsewhere; nothing was written.
    OutputLocked { path: PathBuf },
}

/// Summary statistics for a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub lines_collected: usize,
    pub files_read: usize,
    pub matches: usize,
    pub warnings: Vec<String>,
    pub outcome: ReportOutcome,
}
