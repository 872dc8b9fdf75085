//! Local JSON file storage backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::knowledge::QaEntry;
use crate::storage::{DatasetStorage, StorageError};

/// Dataset stored as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage backend for the dataset file at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DatasetStorage for JsonFileStorage {
    fn read_records(&self) -> Result<Vec<serde_json::Value>, StorageError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(self.path.clone()),
            ErrorKind::PermissionDenied => StorageError::PermissionDenied(self.path.clone()),
            _ => StorageError::Read {
                path: self.path.clone(),
                source: e,
            },
        })?;

        serde_json::from_str(&contents).map_err(|e| StorageError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_entries(&self, entries: &[QaEntry]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // serde_json keeps non-ASCII text literal and indents with two spaces.
        let contents = serde_json::to_string_pretty(entries).map_err(StorageError::Serialize)?;

        fs::write(&self.path, contents).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => StorageError::PermissionDenied(self.path.clone()),
            _ => StorageError::Write {
                path: self.path.clone(),
                source: e,
            },
        })
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
