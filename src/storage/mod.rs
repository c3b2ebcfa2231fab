//! Storage layer for the wallet
//!
//! Loads and saves plain JSON documents with atomic writes and automatic
//! directory creation. Failures never propagate past [`JsonStore`]: they are
//! logged and reported as `None` or `false`.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::config::paths::absolutize;
use crate::error::WalletError;

/// Loads and saves JSON documents, falling back to a default path
#[derive(Debug, Clone)]
pub struct JsonStore {
    default_path: PathBuf,
}

impl JsonStore {
    /// Create a store whose default path is resolved once, here
    pub fn new(default_path: impl AsRef<Path>) -> Result<Self, WalletError> {
        Ok(Self {
            default_path: absolutize(default_path.as_ref())?,
        })
    }

    /// The absolute default path
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Path used for `path`, which may be empty to mean the default
    pub fn resolve(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => self.default_path.clone(),
        }
    }

    /// Load a JSON document
    ///
    /// Returns `None` if the file is missing, unreadable or not valid JSON.
    pub fn load(&self, path: Option<&Path>) -> Option<Value> {
        let path = self.resolve(path);
        match read_json::<Value, _>(&path) {
            Ok(doc) => {
                info!(path = %path.display(), "Loaded document");
                Some(doc)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load document");
                None
            }
        }
    }

    /// Save a JSON document, replacing any existing file
    ///
    /// Returns whether the document was written.
    pub fn save(&self, doc: &Value, path: Option<&Path>) -> bool {
        let path = self.resolve(path);
        match write_json_atomic(&path, doc) {
            Ok(()) => {
                info!(path = %path.display(), "Saved document");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to save document");
                false
            }
        }
    }
}
