//! Knowledge store: Q&A entries and the normalized question lookup table.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::local::JsonFileStorage;
use crate::storage::{DatasetStorage, StorageError};

/// Errors that can occur when loading or extending a knowledge store.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Dataset not found at {}", .0.display())]
    DataNotFound(PathBuf),

    #[error("Malformed dataset entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error("Failed to load dataset: {0}")]
    Load(#[source] StorageError),

    #[error("Failed to persist dataset: {0}")]
    Persistence(#[source] StorageError),
}

/// A single question/answer record from the dataset.
///
/// `category` and `difficulty` are carried through for listing and
/// persistence; matching only looks at `question` and `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: String,
}

/// Summary counts over a knowledge store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeStats {
    /// Number of raw entries, duplicates included.
    pub total_entries: usize,
    /// Number of distinct normalized questions.
    pub distinct_questions: usize,
    /// Entry count per category, in first-seen order.
    pub categories: Vec<(String, usize)>,
}

/// Normalize a question into its lookup key.
///
/// Lowercases, then strips trailing `？` and `?` characters. Other
/// punctuation and leading question marks are kept.
#[must_use]
pub fn normalize_question(question: &str) -> String {
    question
        .to_lowercase()
        .trim_end_matches(['？', '?'])
        .to_string()
}

/// In-memory Q&A lookup table bound to a backing dataset.
///
/// Keys are normalized questions kept in insertion order. A later entry with
/// the same normalized question replaces the answer but keeps the original
/// position.
pub struct KnowledgeStore {
    storage: Box<dyn DatasetStorage>,
    entries: Vec<QaEntry>,
    answers: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("location", &self.storage.location())
            .field("entries", &self.entries.len())
            .field("questions", &self.answers.len())
            .finish()
    }
}

impl KnowledgeStore {
    /// Create an empty store that persists to `storage`.
    #[must_use]
    pub fn empty(storage: Box<dyn DatasetStorage>) -> Self {
        Self {
            storage,
            entries: Vec::new(),
            answers: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Load a store from the JSON dataset at `path`.
    ///
    /// # Errors
    ///
    /// Returns `KnowledgeError::DataNotFound` if the file doesn't exist.
    /// Returns `KnowledgeError::MalformedEntry` for the first record missing a
    /// required string field.
    /// Returns `KnowledgeError::Load` for permission, I/O and JSON failures.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        Self::from_storage(Box::new(JsonFileStorage::new(path.to_path_buf())))
    }

    /// Load a store, starting empty if the dataset file doesn't exist yet.
    ///
    /// The empty store stays bound to `path`, so a later [`add`](Self::add)
    /// creates the file.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), except `DataNotFound` is logged and
    /// recovered.
    pub fn load_or_empty(path: &Path) -> Result<Self, KnowledgeError> {
        match Self::load(path) {
            Err(KnowledgeError::DataNotFound(missing)) => {
                warn!(
                    path = %missing.display(),
                    "dataset not found, starting with an empty knowledge store"
                );
                Ok(Self::empty(Box::new(JsonFileStorage::new(missing))))
            }
            other => other,
        }
    }

    /// Load a store from an arbitrary storage backend.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_storage(storage: Box<dyn DatasetStorage>) -> Result<Self, KnowledgeError> {
        let records = storage.read_records().map_err(|e| match e {
            StorageError::NotFound(path) => KnowledgeError::DataNotFound(path),
            other => KnowledgeError::Load(other),
        })?;

        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<QaEntry>(record).map_err(|e| {
                    KnowledgeError::MalformedEntry {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut store = Self::empty(storage);
        for entry in entries {
            store.insert(entry);
        }

        Ok(store)
    }

    fn insert(&mut self, entry: QaEntry) {
        let key = normalize_question(&entry.question);
        if let Some(&position) = self.positions.get(&key) {
            self.answers[position].1.clone_from(&entry.answer);
        } else {
            self.positions.insert(key.clone(), self.answers.len());
            self.answers.push((key, entry.answer.clone()));
        }
        self.entries.push(entry);
    }

    /// Add an entry and write the full dataset back to storage.
    ///
    /// The in-memory table is updated before the write, so the entry is
    /// answerable even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `KnowledgeError::Persistence` if the dataset cannot be written.
    pub fn add(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<(), KnowledgeError> {
        self.insert(QaEntry {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            difficulty: difficulty.into(),
        });

        self.storage
            .write_entries(&self.entries)
            .map_err(KnowledgeError::Persistence)?;

        info!(
            path = %self.storage.location().display(),
            entries = self.entries.len(),
            "knowledge entry added"
        );
        Ok(())
    }

    /// Exact lookup by question; the question is normalized first.
    #[must_use]
    pub fn get(&self, question: &str) -> Option<&str> {
        self.get_normalized(&normalize_question(question))
    }

    /// Exact lookup by an already-normalized key.
    #[must_use]
    pub fn get_normalized(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&position| self.answers[position].1.as_str())
    }

    /// Iterate `(normalized question, answer)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, a)| (k.as_str(), a.as_str()))
    }

    /// Number of distinct normalized questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// All raw entries, in load/add order.
    #[must_use]
    pub fn entries(&self) -> &[QaEntry] {
        &self.entries
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.storage.location()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(entry.category.as_str());
            }
        }
        seen
    }

    /// Questions (as written in the dataset) belonging to `category`.
    #[must_use]
    pub fn questions_by_category(&self, category: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.question.as_str())
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> KnowledgeStats {
        let mut categories: Vec<(String, usize)> = Vec::new();
        for entry in &self.entries {
            match categories.iter_mut().find(|(name, _)| *name == entry.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((entry.category.clone(), 1)),
            }
        }

        KnowledgeStats {
            total_entries: self.entries.len(),
            distinct_questions: self.answers.len(),
            categories,
        }
    }
}
