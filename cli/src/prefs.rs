//! [`PreferenceStore`] backed by a JSON object on disk.
//!
//! The file stands in for `localStorage`: a flat map of string keys to string
//! values, rewritten in full on every `set`. A missing file reads as empty; a
//! corrupt one reads as empty but refuses writes.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use storefront_widgets::env::{PreferenceStore, StorageError};

pub struct FilePreferences {
    path: Option<PathBuf>,
}

impl FilePreferences {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Strict read: a missing file is empty, anything unreadable is an error.
    fn read(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Write(format!("cannot read {}: {e}", path.display()))),
        };
        serde_json::from_str(&raw)
            .map_err(|e| StorageError::Write(format!("{} is not a string map: {e}", path.display())))
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        Self::read(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring preferences file");
            BTreeMap::new()
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path.as_deref()?;
        Self::load(path).remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path.as_deref().ok_or(StorageError::Unavailable)?;
        // Never overwrite a file that did not parse.
        let mut prefs = Self::read(path)?;
        prefs.insert(key.to_owned(), value.to_owned());
        let rendered = serde_json::to_string_pretty(&prefs).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(path, rendered).map_err(|e| StorageError::Write(e.to_string()))
    }
}
