//! Question matching: exact lookup, Jaccard fuzzy match, keyword fallback.
//!
//! Stages run in order and stop at the first hit:
//!
//! 1. Exact match on the normalized query.
//! 2. Fuzzy match: first stored question whose token-set Jaccard similarity
//!    with the normalized query exceeds the threshold.
//! 3. Keyword match: stored question containing the most tokens of the raw
//!    query, earliest question winning ties.
//!
//! If nothing matches, the configured fallback message is returned.

pub mod rule_based;

use tracing::debug;

use crate::knowledge::{KnowledgeStore, normalize_question};
use crate::tokenizer::{token_set, tokenize};

pub use rule_based::RuleBasedAnswerer;

/// Default Jaccard threshold; a fuzzy hit needs strictly more than this.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

/// Fallback message that suggests topics to ask about.
pub const DETAILED_FALLBACK: &str =
    "抱歉，我无法回答这个问题。请尝试问一些关于中国地理的问题，比如省会城市、河流、山脉等。";

/// Fallback message without suggestions.
pub const SHORT_FALLBACK: &str = "抱歉，我无法回答这个问题。";

/// Anything that can answer a free-text question.
///
/// Implementations never fail; a miss is answered with a fallback message.
pub trait Answerer: Send + Sync {
    fn answer(&self, question: &str) -> String;
}

/// Tunable matcher parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherOptions {
    pub fuzzy_threshold: f64,
    pub fallback: String,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            fallback: DETAILED_FALLBACK.to_string(),
        }
    }
}

/// How a query was answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Fuzzy { similarity: f64 },
    Keyword { score: usize },
    Fallback,
}

/// An answer together with the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub answer: String,
    pub kind: MatchKind,
    /// Normalized stored question that matched, if any.
    pub matched_question: Option<String>,
}

/// Stateless matcher over a borrowed [`KnowledgeStore`].
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    options: MatcherOptions,
}

impl Matcher {
    #[must_use]
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Answer `query` from `store`.
    #[must_use]
    pub fn answer(&self, store: &KnowledgeStore, query: &str) -> String {
        self.lookup(store, query).answer
    }

    /// Answer `query` from `store`, reporting which stage matched.
    #[must_use]
    pub fn lookup(&self, store: &KnowledgeStore, query: &str) -> Match {
        let normalized = normalize_question(query);

        if let Some(answer) = store.get_normalized(&normalized) {
            debug!(query, "exact match");
            return Match {
                answer: answer.to_string(),
                kind: MatchKind::Exact,
                matched_question: Some(normalized),
            };
        }

        if let Some(found) = self.fuzzy_match(store, &normalized) {
            return found;
        }

        // The keyword stage deliberately tokenizes the raw query.
        if let Some(found) = keyword_match(store, query) {
            return found;
        }

        debug!(query, "no match, returning fallback");
        Match {
            answer: self.options.fallback.clone(),
            kind: MatchKind::Fallback,
            matched_question: None,
        }
    }

    fn fuzzy_match(&self, store: &KnowledgeStore, normalized: &str) -> Option<Match> {
        store.iter().find_map(|(question, answer)| {
            let similarity = jaccard_similarity(normalized, question);
            (similarity > self.options.fuzzy_threshold).then(|| {
                debug!(question, similarity, "fuzzy match");
                Match {
                    answer: answer.to_string(),
                    kind: MatchKind::Fuzzy { similarity },
                    matched_question: Some(question.to_string()),
                }
            })
        })
    }
}

fn keyword_match(store: &KnowledgeStore, query: &str) -> Option<Match> {
    let keywords = tokenize(query);

    let mut best: Option<(usize, &str, &str)> = None;
    for (question, answer) in store.iter() {
        let score = keyword_score(&keywords, question);
        if score > best.map_or(0, |(s, _, _)| s) {
            best = Some((score, question, answer));
        }
    }

    best.map(|(score, question, answer)| {
        debug!(question, score, "keyword match");
        Match {
            answer: answer.to_string(),
            kind: MatchKind::Keyword { score },
            matched_question: Some(question.to_string()),
        }
    })
}

/// Jaccard index of the token sets of `a` and `b`.
///
/// Returns 0.0 when either side has no tokens.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let left = token_set(a);
    let right = token_set(b);

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();

    intersection as f64 / union as f64
}

/// Number of `keywords` that occur as substrings of `question`.
///
/// Repeated keywords count once per occurrence in `keywords`.
#[must_use]
pub fn keyword_score(keywords: &[&str], question: &str) -> usize {
    keywords.iter().filter(|k| question.contains(**k)).count()
}
