//! Env-file reading
//!
//! Reads `.env`-syntax files into key/value pairs without touching the
//! process environment, so the loader stays free of global side effects.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Conventional env-file name, looked up in the working directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Locate the conventional env file under `dir`, if it exists.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(ENV_FILE_NAME);
    path.exists().then_some(path)
}

/// Read every `KEY=value` pair from `path`, in file order.
///
/// A later duplicate of a key wins, per dotenv convention. A missing file
/// is `ConfigError::MissingFile`; anything else wrong with the file (I/O,
/// malformed lines) is `ConfigError::UnreadableFile`.
pub fn read(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| classify(path, e))?;

    let mut pairs = Vec::new();
    for item in iter {
        let (key, value) = item.map_err(|e| classify(path, e))?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

fn classify(path: &Path, source: dotenvy::Error) -> ConfigError {
    if source.not_found() {
        ConfigError::MissingFile { path: path.to_path_buf() }
    } else {
        ConfigError::UnreadableFile { path: path.to_path_buf(), source }
    }
}
