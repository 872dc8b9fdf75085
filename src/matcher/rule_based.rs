//! Rule-based answerer backed by a knowledge store.

use crate::knowledge::{KnowledgeError, KnowledgeStore};
use crate::matcher::{Answerer, Match, Matcher, MatcherOptions};

/// Answers questions from an owned [`KnowledgeStore`].
///
/// Construct once and hand it to whatever serves queries. Reads take `&self`;
/// adding knowledge takes `&mut self`, so concurrent callers wrap it in a
/// reader-writer lock.
#[derive(Debug)]
pub struct RuleBasedAnswerer {
    store: KnowledgeStore,
    matcher: Matcher,
}

impl RuleBasedAnswerer {
    #[must_use]
    pub fn new(store: KnowledgeStore, options: MatcherOptions) -> Self {
        Self {
            store,
            matcher: Matcher::new(options),
        }
    }

    /// Answer with match details.
    #[must_use]
    pub fn lookup(&self, question: &str) -> Match {
        self.matcher.lookup(&self.store, question)
    }

    /// Add an entry to the underlying store and persist it.
    ///
    /// # Errors
    ///
    /// Returns `KnowledgeError::Persistence` if the write fails. The entry is
    /// answerable either way.
    pub fn add_knowledge(
        &mut self,
        question: &str,
        answer: &str,
        category: &str,
        difficulty: &str,
    ) -> Result<(), KnowledgeError> {
        self.store.add(question, answer, category, difficulty)
    }

    #[must_use]
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }
}

impl Answerer for RuleBasedAnswerer {
    fn answer(&self, question: &str) -> String {
        self.lookup(question).answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::DETAILED_FALLBACK;
    use crate::matcher::tests::store_with;

    fn answerer() -> RuleBasedAnswerer {
        let store = store_with(&[
            ("北京是哪个省的省会？", "北京是直辖市，不属于其他省份。"),
            ("黄河发源于哪里？", "黄河发源于青藏高原。"),
            ("长江有多长？", "长江全长约6300公里。"),
        ]);
        RuleBasedAnswerer::new(store, MatcherOptions::default())
    }

    #[test]
    fn answers_without_trailing_question_mark() {
        assert_eq!(
            answerer().answer("北京是哪个省的省会"),
            "北京是直辖市，不属于其他省份。"
        );
    }

    #[test]
    fn loosely_phrased_question_finds_related_entry() {
        // "长江" overlaps the length entry, not the Yellow River one.
        assert_eq!(answerer().answer("长江 大概多长"), "长江全长约6300公里。");
        assert_eq!(answerer().answer("长江,大概多长"), "长江全长约6300公里。");
    }

    #[test]
    fn unsplit_ideographic_query_never_picks_unrelated_entry() {
        // A pure CJK query is a single token, so it only matches as a
        // substring of a stored question.
        assert_eq!(answerer().answer("长江大概多长"), DETAILED_FALLBACK);
        assert_eq!(answerer().answer("长江有多长"), "长江全长约6300公里。");
    }

    #[test]
    fn works_through_trait_object() {
        let boxed: Box<dyn Answerer> = Box::new(answerer());
        assert_eq!(boxed.answer("xyzzyplugh123"), DETAILED_FALLBACK);
    }

    #[test]
    fn added_knowledge_is_answerable() {
        let mut answerer = answerer();
        answerer
            .add_knowledge("南极洲最大的冰盖是什么？", "南极冰盖", "世界地理", "困难")
            .unwrap();

        assert_eq!(answerer.answer("南极洲最大的冰盖是什么？"), "南极冰盖");
        assert_eq!(answerer.store().len(), 4);
    }
}
