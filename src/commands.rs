//! Command implementations shared by the CLI and other front ends.

use std::path::Path;

use anyhow::Context;

use crate::knowledge::{KnowledgeStats, KnowledgeStore, QaEntry};
use crate::matcher::{Match, MatcherOptions, RuleBasedAnswerer};

/// Maximum length, in characters, of a question, category or difficulty.
const MAX_INPUT_LENGTH: usize = 200;

/// Maximum length, in characters, of an answer.
const MAX_ANSWER_LENGTH: usize = 2000;

/// Category used by `add` when none is given.
pub const DEFAULT_CATEGORY: &str = "其他";

/// Difficulty used by `add` when none is given.
pub const DEFAULT_DIFFICULTY: &str = "中等";

/// Validate a user-provided text field.
fn validate_field(value: &str, field_name: &str, max_len: usize) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{field_name} cannot be empty");
    }

    let len = value.chars().count();
    if len > max_len {
        anyhow::bail!("{field_name} too long: {len} chars (max {max_len})");
    }

    if value.contains('\0') {
        anyhow::bail!("{field_name} contains invalid character: NUL");
    }

    Ok(())
}

/// Load the dataset and build an answerer over it.
///
/// A missing dataset yields an empty store; every question then gets the
/// fallback message.
///
/// # Errors
///
/// Returns an error if the dataset exists but cannot be read or contains a
/// malformed entry.
pub fn open_answerer(dataset: &Path, options: MatcherOptions) -> anyhow::Result<RuleBasedAnswerer> {
    let store = KnowledgeStore::load_or_empty(dataset)
        .with_context(|| format!("Cannot open dataset {}", dataset.display()))?;
    Ok(RuleBasedAnswerer::new(store, options))
}

/// Answer a question against the dataset.
///
/// # Errors
///
/// Returns an error if the question is empty or the dataset cannot be loaded.
pub fn ask(dataset: &Path, options: MatcherOptions, question: &str) -> anyhow::Result<Match> {
    validate_field(question, "Question", MAX_INPUT_LENGTH)?;
    let answerer = open_answerer(dataset, options)?;
    Ok(answerer.lookup(question.trim()))
}

/// Add a Q&A entry to the dataset, creating the file if needed.
///
/// # Errors
///
/// Returns an error if any field is empty or too long, the dataset cannot be
/// loaded, or the updated dataset cannot be written.
pub fn add(dataset: &Path, entry: QaEntry) -> anyhow::Result<QaEntry> {
    validate_field(&entry.question, "Question", MAX_INPUT_LENGTH)?;
    validate_field(&entry.answer, "Answer", MAX_ANSWER_LENGTH)?;
    validate_field(&entry.category, "Category", MAX_INPUT_LENGTH)?;
    validate_field(&entry.difficulty, "Difficulty", MAX_INPUT_LENGTH)?;

    let mut store = KnowledgeStore::load_or_empty(dataset)
        .with_context(|| format!("Cannot open dataset {}", dataset.display()))?;

    store.add(
        entry.question.clone(),
        entry.answer.clone(),
        entry.category.clone(),
        entry.difficulty.clone(),
    )?;

    Ok(entry)
}

/// List dataset entries, optionally filtered to one category.
///
/// # Errors
///
/// Returns an error if the dataset exists but cannot be loaded.
pub fn list(dataset: &Path, category: Option<&str>) -> anyhow::Result<Vec<QaEntry>> {
    let store = KnowledgeStore::load_or_empty(dataset)
        .with_context(|| format!("Cannot open dataset {}", dataset.display()))?;

    Ok(store
        .entries()
        .iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .cloned()
        .collect())
}

/// Distinct categories in the dataset, in first-seen order.
///
/// # Errors
///
/// Returns an error if the dataset exists but cannot be loaded.
pub fn categories(dataset: &Path) -> anyhow::Result<Vec<String>> {
    let store = KnowledgeStore::load_or_empty(dataset)
        .with_context(|| format!("Cannot open dataset {}", dataset.display()))?;

    Ok(store.categories().into_iter().map(str::to_string).collect())
}

/// Summary counts for the dataset.
///
/// # Errors
///
/// Returns an error if the dataset exists but cannot be loaded.
pub fn stats(dataset: &Path) -> anyhow::Result<KnowledgeStats> {
    let store = KnowledgeStore::load_or_empty(dataset)
        .with_context(|| format!("Cannot open dataset {}", dataset.display()))?;

    Ok(store.stats())
}
