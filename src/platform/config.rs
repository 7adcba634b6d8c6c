// EventSheet - platform/config.rs
//
// Configuration directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance. Event phrases are compiled in and are not
// part of the configuration.

use crate::core::model::DecodePolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for EventSheet configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/eventsheet/ or %APPDATA%\EventSheet\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[input]` section.
    pub input: InputSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Directory holding the log files.
    pub log_dir: Option<String>,
    /// Include glob patterns (file name only).
    pub include_patterns: Option<Vec<String>>,
    /// Maximum files read per run.
    pub max_files: Option<usize>,
    /// "drop", "replace" or "strict".
    pub decode: Option<String>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Spreadsheet path.
    pub path: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Input --
    pub log_dir: PathBuf,
    pub include_patterns: Vec<String>,
    pub max_files: usize,
    pub decode: DecodePolicy,

    // -- Output --
    pub output_file: PathBuf,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            max_files: constants::DEFAULT_MAX_FILES,
            decode: DecodePolicy::default(),
            output_file: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults; it is only worth a warning when the user
/// named the file explicitly (`explicit`). An unreadable or unparseable file
/// yields defaults plus a warning.
pub fn load_config(config_path: &Path, explicit: bool) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        if explicit {
            warnings.push(format!(
                "Config file '{}' does not exist. Using defaults.",
                config_path.display()
            ));
        } else {
            tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        }
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, parse_warnings) = parse_config(&content, config_path);
    warnings.extend(parse_warnings);
    (config, warnings)
}

/// Parse and validate config.toml content. `path` is used in messages only.
pub fn parse_config(content: &str, path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Input: log_dir --
    if let Some(dir) = raw.input.log_dir {
        if dir.trim().is_empty() {
            warnings.push(format!(
                "[input] log_dir is empty. Using default (\"{}\").",
                constants::DEFAULT_LOG_DIR
            ));
        } else {
            config.log_dir = PathBuf::from(dir);
        }
    }

    // -- Input: include_patterns --
    if let Some(patterns) = raw.input.include_patterns {
        let invalid: Vec<&String> = patterns
            .iter()
            .filter(|p| glob::Pattern::new(p).is_err())
            .collect();
        if invalid.is_empty() {
            config.include_patterns = patterns;
        } else {
            warnings.push(format!(
                "[input] include_patterns contains invalid glob(s) {invalid:?}. Using default ({:?}).",
                constants::DEFAULT_INCLUDE_PATTERNS,
            ));
        }
    }

    // -- Input: max_files --
    if let Some(files) = raw.input.max_files {
        if (1..=constants::ABSOLUTE_MAX_FILES).contains(&files) {
            config.max_files = files;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "input.max_files".to_string(),
                value: files.to_string(),
                expected: format!("1-{}", constants::ABSOLUTE_MAX_FILES),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_MAX_FILES
            ));
        }
    }

    // -- Input: decode --
    if let Some(ref decode) = raw.input.decode {
        match decode.parse::<DecodePolicy>() {
            Ok(policy) => config.decode = policy,
            Err(e) => warnings.push(format!(
                "[input] decode: {e}. Using default ({}).",
                DecodePolicy::default()
            )),
        }
    }

    // -- Output: path --
    if let Some(out) = raw.output.path {
        if out.trim().is_empty() {
            warnings.push(format!(
                "[output] path is empty. Using default (\"{}\").",
                constants::DEFAULT_OUTPUT_FILE
            ));
        } else {
            config.output_file = PathBuf::from(out);
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("config.toml"))
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.output_file, PathBuf::from("analysis_results.xlsx"));
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = parse(
            r#"
            [input]
            log_dir = "/var/log/app"
            include_patterns = ["*.log", "*.log.gz", "*.txt"]
            max_files = 50
            decode = "replace"

            [output]
            path = "report.xlsx"

            [logging]
            level = "DEBUG"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/app"));
        assert_eq!(config.include_patterns.len(), 3);
        assert_eq!(config.max_files, 50);
        assert_eq!(config.decode, DecodePolicy::Replace);
        assert_eq!(config.output_file, PathBuf::from("report.xlsx"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let (config, warnings) = parse(
            r#"
            [input]
            max_files = 0
            decode = "lenient"
            include_patterns = ["[unclosed"]

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert_eq!(config.max_files, constants::DEFAULT_MAX_FILES);
        assert_eq!(config.decode, DecodePolicy::Drop);
        assert_eq!(config.include_patterns, AppConfig::default().include_patterns);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_, warnings) = parse("[input]\nfuture_option = true\n[extra]\nx = 1\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_malformed_toml_uses_defaults() {
        let (config, warnings) = parse("[input\nlog_dir = ");
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_file_warns_only_when_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(load_config(&path, false).1.is_empty());
        assert_eq!(load_config(&path, true).1.len(), 1);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\npath = \"out.xlsx\"\n").unwrap();
        let (config, warnings) = load_config(&path, true);
        assert!(warnings.is_empty());
        assert_eq!(config.output_file, PathBuf::from("out.xlsx"));
    }
}
