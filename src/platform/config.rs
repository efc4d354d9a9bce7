// SocialGaze - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SocialGaze configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/socialgaze/ or %APPDATA%\SocialGaze\config\)
    pub config_dir: PathBuf,

    /// Full path of the default config.toml.
    pub config_file: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine platform directories, using current directory");
                PathBuf::from(".")
            }
        };
        let config_file = config_dir.join(constants::CONFIG_FILE_NAME);
        tracing::debug!(config = %config_file.display(), "Platform paths resolved");
        Self {
            config_dir,
            config_file,
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[source]` section.
    pub source: SourceSection,
    /// `[loader]` section.
    pub loader: LoaderSection,
    /// `[dashboard]` section.
    pub dashboard: DashboardSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[source]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Path of the CSV source ("-" for stdin).
    pub path: Option<String>,
}

/// `[loader]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoaderSection {
    /// "auto", "tab", or a single ASCII character.
    pub delimiter: Option<String>,
    /// "pad" or "drop".
    pub malformed_rows: Option<String>,
}

/// `[dashboard]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Region slices in chart order.
    pub regions: Option<Vec<RegionEntry>>,
}

/// One `[[dashboard.regions]]` entry.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RegionEntry {
    /// Region value as stored in the data.
    pub code: String,
    /// Display label (defaults to `code`).
    pub label: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Source --
    /// Source path; `None` defers to the CLI or the built-in default.
    pub source_path: Option<String>,

    // -- Loader --
    /// Fixed delimiter; `None` means auto-detect.
    pub delimiter: Option<u8>,
    /// Discard malformed rows instead of padding them.
    pub drop_malformed_rows: bool,

    // -- Dashboard --
    /// (code, label) pairs in chart order.
    pub regions: Vec<(String, String)>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            delimiter: None,
            drop_malformed_rows: false,
            regions: constants::DEFAULT_REGIONS
                .iter()
                .map(|(code, label)| ((*code).to_string(), (*label).to_string()))
                .collect(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Parse a delimiter setting: `"auto"` yields `Some(None)`, `"tab"` or a
/// single ASCII character yields `Some(Some(byte))`, anything else `None`.
pub fn parse_delimiter(value: &str) -> Option<Option<u8>> {
    match value {
        v if v.eq_ignore_ascii_case("auto") => Some(None),
        v if v.eq_ignore_ascii_case("tab") => Some(Some(b'\t')),
        v if v.len() == 1 && v.is_ascii() && v != "\"" && v != "\n" && v != "\r" => {
            Some(Some(v.as_bytes()[0]))
        }
        _ => None,
    }
}

/// Load the config file at the platform default location.
///
/// If the file does not exist, returns defaults with no warnings (first run).
/// If it is unreadable or unparseable, returns defaults plus a warning so
/// the application still starts but the user is informed.
pub fn load_default_config(paths: &PlatformPaths) -> (AppConfig, Vec<String>) {
    let path = &paths.config_file;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }
    match load_config_file(path) {
        Ok(result) => result,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load an explicitly named config file. A missing or unparseable file is an
/// error because the user asked for it.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let result = parse_config_str(&content, path)?;
    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(result)
}

/// Parse and validate config.toml content.
///
/// `path` is used for error messages only.
pub fn parse_config_str(
    content: &str,
    path: &Path,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(validate(raw))
}

/// Validate each field, accumulating warnings for every rejected value.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();
    let mut reject = |field: &str, value: &str, expected: &str| {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value: value.to_string(),
                expected: expected.to_string(),
            }
            .to_string(),
        );
    };

    // -- Source: path --
    if let Some(path) = raw.source.path {
        if path.trim().is_empty() {
            reject("source.path", &path, "a file path or \"-\" for stdin");
        } else {
            config.source_path = Some(path);
        }
    }

    // -- Loader: delimiter --
    if let Some(ref value) = raw.loader.delimiter {
        match parse_delimiter(value) {
            Some(d) => config.delimiter = d,
            None => reject(
                "loader.delimiter",
                value,
                "\"auto\", \"tab\", or a single ASCII character. Using auto",
            ),
        }
    }

    // -- Loader: malformed_rows --
    if let Some(ref value) = raw.loader.malformed_rows {
        match value.to_lowercase().as_str() {
            "pad" => config.drop_malformed_rows = false,
            "drop" => config.drop_malformed_rows = true,
            _ => reject("loader.malformed_rows", value, "\"pad\" or \"drop\". Using pad"),
        }
    }

    // -- Dashboard: regions --
    if let Some(entries) = raw.dashboard.regions {
        let mut regions = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.code.trim().is_empty() {
                reject("dashboard.regions.code", &entry.code, "a non-empty region code");
                continue;
            }
            let label = entry
                .label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| entry.code.clone());
            regions.push((entry.code, label));
        }
        if regions.len() > constants::MAX_REGIONS {
            reject(
                "dashboard.regions",
                &regions.len().to_string(),
                &format!("at most {} regions. Extra regions ignored", constants::MAX_REGIONS),
            );
            regions.truncate(constants::MAX_REGIONS);
        }
        if regions.is_empty() {
            reject("dashboard.regions", "[]", "at least one region. Using defaults");
        } else {
            config.regions = regions;
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            reject(
                "logging.level",
                level,
                "error, warn, info, debug, trace. Using default (info)",
            );
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
