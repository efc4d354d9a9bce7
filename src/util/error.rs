// SocialGaze - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its cause so the
// full chain can be logged.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SocialGaze operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SocialGazeError {
    /// Acquiring or parsing the raw dataset failed.
    Load(LoadError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Writing a finished report failed.
    Export(ExportError),
}

impl fmt::Display for SocialGazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for SocialGazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors raised while acquiring raw text or parsing its header row.
///
/// Data rows never produce a `LoadError`; malformed rows are handled by the
/// loader's row policy and reported in its `LoadReport`.
#[derive(Debug)]
pub enum LoadError {
    /// The source does not exist.
    NotFound { origin: String },

    /// The source exists but could not be read.
    Unreadable { origin: String, source: io::Error },

    /// The source exceeds the maximum size the loader will materialise.
    /// For streams `size` is the number of bytes read before giving up.
    TooLarge {
        origin: String,
        size: u64,
        max_size: u64,
    },

    /// The header row could not be decoded.
    HeaderRead { source: csv::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { origin } => write!(f, "Data source '{origin}' does not exist"),
            Self::Unreadable { origin, source } => {
                write!(f, "Data source '{origin}' could not be read: {source}")
            }
            Self::TooLarge {
                origin,
                size,
                max_size,
            } => write!(
                f,
                "Data source '{origin}' exceeds maximum of {max_size} bytes ({size} bytes seen)"
            ),
            Self::HeaderRead { source } => write!(f, "Cannot read header row: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::HeaderRead { source } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for SocialGazeError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
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

impl From<ConfigError> for SocialGazeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing a finished report.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => write!(f, "Export I/O error '{target}': {source}"),
            Self::Csv { target, source } => write!(f, "CSV export error '{target}': {source}"),
            Self::Json { target, source } => write!(f, "JSON export error '{target}': {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for SocialGazeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for SocialGaze results.
pub type Result<T> = std::result::Result<T, SocialGazeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_load_error_chain_preserved() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: SocialGazeError = LoadError::Unreadable {
            origin: "data.csv".to_string(),
            source: io_err,
        }
        .into();

        assert!(err.to_string().starts_with("Load error: Data source 'data.csv'"));
        let load = err.source().expect("load error in chain");
        assert!(load.source().is_some(), "io error should be preserved");
    }

    #[test]
    fn test_too_large_reports_both_sizes() {
        let err = LoadError::TooLarge {
            origin: "big.csv".to_string(),
            size: 300,
            max_size: 256,
        };
        assert_eq!(
            err.to_string(),
            "Data source 'big.csv' exceeds maximum of 256 bytes (300 bytes seen)"
        );
    }
}
