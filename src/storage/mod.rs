//! Dataset storage trait and implementations.
//!
//! A dataset is a JSON array of Q&A records. Storage only moves records in and
//! out of the backing store; validating record shape is the knowledge store's
//! job.

pub mod local;

use std::path::{Path, PathBuf};

use crate::knowledge::QaEntry;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Trait for dataset backends.
pub trait DatasetStorage: Send + Sync {
    /// Read the raw records of the dataset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the dataset does not exist, and a
    /// distinct variant for permission, I/O and JSON failures.
    fn read_records(&self) -> Result<Vec<serde_json::Value>, StorageError>;

    /// Replace the dataset with `entries`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entries cannot be serialized or written.
    fn write_entries(&self, entries: &[QaEntry]) -> Result<(), StorageError>;

    /// Check if the dataset exists.
    fn exists(&self) -> bool;

    /// Location of the dataset.
    fn location(&self) -> &Path;
}
