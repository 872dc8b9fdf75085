//! Character-class tokenizer for mixed Chinese/Latin text.
//!
//! Text is split into runs of ideographic and non-ideographic characters.
//! There is no dictionary segmentation: a run of CJK characters is a single
//! token, and so is everything between two CJK runs.

use std::collections::HashSet;

/// Class of a single character as seen by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// CJK Unified Ideographs, U+4E00..=U+9FFF.
    Ideographic,
    /// Everything else, including whitespace and punctuation.
    Other,
}

impl CharClass {
    #[must_use]
    pub fn of(c: char) -> Self {
        if is_ideographic(c) {
            Self::Ideographic
        } else {
            Self::Other
        }
    }
}

/// A trimmed, non-empty run of same-class characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub class: CharClass,
}

/// Returns true for characters in the CJK Unified Ideographs block.
#[must_use]
pub fn is_ideographic(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Split `text` into classified runs, in input order.
///
/// A run ends whenever the next character's class differs from the class of
/// the last character in the run. Each run is trimmed of surrounding
/// whitespace and dropped if nothing remains.
#[must_use]
pub fn runs(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_class: Option<CharClass> = None;

    for (idx, c) in text.char_indices() {
        let class = CharClass::of(c);
        if let Some(current) = run_class
            && current != class
        {
            push_run(&mut tokens, &text[run_start..idx], current);
            run_start = idx;
        }
        run_class = Some(class);
    }

    if let Some(current) = run_class {
        push_run(&mut tokens, &text[run_start..], current);
    }

    tokens
}

fn push_run<'a>(tokens: &mut Vec<Token<'a>>, raw: &'a str, class: CharClass) {
    let text = raw.trim();
    if !text.is_empty() {
        tokens.push(Token { text, class });
    }
}

/// Split `text` into token strings. Duplicates are kept.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    runs(text).into_iter().map(|t| t.text).collect()
}

/// Deduplicated token set, for set-based comparisons.
#[must_use]
pub fn token_set(text: &str) -> HashSet<&str> {
    runs(text).into_iter().map(|t| t.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn pure_chinese_is_one_run() {
        assert_eq!(tokenize("长江有多长"), vec!["长江有多长"]);
    }

    #[test]
    fn splits_on_class_change() {
        assert_eq!(
            tokenize("珠穆朗玛峰高8848米"),
            vec!["珠穆朗玛峰高", "8848", "米"]
        );
    }

    #[test]
    fn whitespace_stays_inside_other_runs() {
        assert_eq!(tokenize("hello world"), vec!["hello world"]);
        assert_eq!(tokenize("  abc 长江  "), vec!["abc", "长江"]);
    }

    #[test]
    fn punctuation_between_ideographs_is_emitted() {
        // Full-width punctuation sits outside U+4E00..=U+9FFF.
        assert_eq!(tokenize("北京，上海"), vec!["北京", "，", "上海"]);
        assert_eq!(tokenize("长江有多长？"), vec!["长江有多长", "？"]);
    }

    #[test]
    fn whitespace_only_run_is_dropped() {
        assert_eq!(tokenize("北京 上海"), vec!["北京", "上海"]);
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        assert_eq!(tokenize("长江a长江a"), vec!["长江", "a", "长江", "a"]);
    }

    #[test]
    fn token_set_deduplicates() {
        let set = token_set("长江a长江a");
        assert_eq!(set.len(), 2);
        assert!(set.contains("长江"));
        assert!(set.contains("a"));
    }

    #[test]
    fn runs_report_class() {
        let tokens = runs("abc北京");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].class, CharClass::Other);
        assert_eq!(tokens[1].class, CharClass::Ideographic);
    }

    #[test]
    fn block_boundaries() {
        assert!(is_ideographic('\u{4E00}'));
        assert!(is_ideographic('\u{9FFF}'));
        assert!(!is_ideographic('\u{4DFF}'));
        assert!(!is_ideographic('\u{A000}'));
        assert!(!is_ideographic('？'));
    }

    #[test]
    fn rejoined_runs_resplit_identically() {
        let inputs = [
            "北京是哪个省的省会？",
            "珠穆朗玛峰高8848.86米",
            "Yangtze长江River",
            "黄河,长江;珠江",
            "abc",
        ];

        for input in inputs {
            let first = tokenize(input);
            let rejoined: String = first.concat();
            assert_eq!(tokenize(&rejoined), first, "re-split differs for {input:?}");
        }
    }
}
