//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of settings construction.
///
/// `MissingFile` is produced by the env-file reader and absorbed by the
/// loader (defaults and the process environment still apply). The other
/// variants are fatal: the process cannot reliably start with unknown
/// configuration state, so they propagate to process startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The env file does not exist. Non-fatal.
    #[error("env file not found: {path}")]
    MissingFile { path: PathBuf },

    /// The env file exists but could not be read or parsed. Fatal.
    #[error("failed reading env file {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A raw value could not be coerced to the field's declared type. Fatal.
    #[error("invalid value for {key}: {value:?} is not a valid {expected}")]
    Coercion {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    /// Whether construction may proceed on defaults despite this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConfigError::MissingFile { .. })
    }
}
