// SocialGaze - app/source.rs
//
// Acquisition of raw dataset text from a file or standard input.
// Maps platform I/O failures onto LoadError so the caller sees one
// error type for "could not get the data".

use crate::platform::fs;
use crate::util::constants;
use crate::util::error::LoadError;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where the raw CSV text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Stdin,
}

impl DataSource {
    /// Interpret a CLI/config source argument ("-" selects stdin).
    pub fn from_arg(arg: &str) -> Self {
        if arg == constants::STDIN_SOURCE {
            DataSource::Stdin
        } else {
            DataSource::File(PathBuf::from(arg))
        }
    }

    /// Human-readable origin for messages and logs.
    pub fn origin(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read the full raw text, enforcing `MAX_SOURCE_BYTES`.
    pub fn fetch(&self) -> Result<String, LoadError> {
        match self {
            DataSource::File(path) => {
                let origin = self.origin();
                let size = fs::file_size(path).map_err(|e| io_to_load_error(&origin, e))?;
                if size > constants::MAX_SOURCE_BYTES {
                    return Err(LoadError::TooLarge {
                        origin,
                        size,
                        max_size: constants::MAX_SOURCE_BYTES,
                    });
                }
                let content =
                    fs::read_file_lossy(path).map_err(|e| io_to_load_error(&origin, e))?;
                tracing::debug!(origin = %origin, bytes = content.len(), "Source read");
                Ok(content)
            }
            DataSource::Stdin => fetch_from_reader(&self.origin(), io::stdin().lock()),
        }
    }
}

/// Read raw text from any stream, enforcing `MAX_SOURCE_BYTES`.
pub fn fetch_from_reader<R: Read>(origin: &str, reader: R) -> Result<String, LoadError> {
    match fs::read_to_string_capped(reader, constants::MAX_SOURCE_BYTES) {
        Ok(Some(content)) => {
            tracing::debug!(origin, bytes = content.len(), "Source read");
            Ok(content)
        }
        Ok(None) => Err(LoadError::TooLarge {
            origin: origin.to_string(),
            size: constants::MAX_SOURCE_BYTES + 1,
            max_size: constants::MAX_SOURCE_BYTES,
        }),
        Err(e) => Err(io_to_load_error(origin, e)),
    }
}

fn io_to_load_error(origin: &str, e: io::Error) -> LoadError {
    if e.kind() == io::ErrorKind::NotFound {
        LoadError::NotFound {
            origin: origin.to_string(),
        }
    } else {
        LoadError::Unreadable {
            origin: origin.to_string(),
            source: e,
        }
    }
}
