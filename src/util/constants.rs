// EventSheet - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "EventSheet";

/// Application identifier used for config directories.
pub const APP_ID: &str = "EventSheet";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input defaults
// =============================================================================

/// Directory scanned for log files, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Include glob patterns (file name only) for eligible log files.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.log", "*.gz"];

/// Default number of files read in a single run.
pub const DEFAULT_MAX_FILES: usize = 10_000;

/// Hard upper bound on max files (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILES: usize = 100_000;

/// First two bytes of every gzip member (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Maximum number of non-fatal warnings accumulated across a single run.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Output defaults
// =============================================================================

/// Spreadsheet written at the end of a run, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "analysis_results.xlsx";

/// Maximum worksheet name length accepted by Excel.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel rejects in worksheet names.
pub const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Replacement for forbidden worksheet name characters.
pub const SHEET_NAME_REPLACEMENT: char = '_';

/// Worksheet name Excel reserves for itself (compared case-insensitively).
pub const RESERVED_SHEET_NAME: &str = "History";

/// Name used when a label sanitises down to nothing.
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

/// Maximum characters in a single xlsx cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Maximum rows in a worksheet, header row included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Width (in character units) of the single report column.
pub const REPORT_COLUMN_WIDTH: f64 = 120.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
