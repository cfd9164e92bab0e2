//! Save/load persistence
//!
//! Features:
//! - Plain JSON documents
//! - Atomic writes (tmp -> rename)
//! - Missing or corrupt files fall back to defaults

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read and parse a JSON document
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| PersistError::json(path, e))
}

/// Read a JSON document, using the default value when it can't be loaded
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load(path) {
        Ok(value) => value,
        Err(PersistError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::info!("{} not found, starting fresh", path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("{}, using defaults", e);
            T::default()
        }
    }
}

/// Write a JSON document. The data goes to a sibling temp file first and is
/// renamed into place, so a crash never leaves a half-written file.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| PersistError::json(path, e))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|e| PersistError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistError::io(path, e))?;
    Ok(())
}
