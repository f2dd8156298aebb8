//! Substring matcher for literal (non-regex) patterns.

use aho_corasick::{AhoCorasick, BuildError};

/// Tests whether the issue text contains a fixed needle.
///
/// Backed by a single-pattern Aho-Corasick automaton so that ASCII
/// case-insensitive search does not need to lowercase the whole text.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    needle: String,
    case_insensitive: bool,
    searcher: AhoCorasick,
}

impl LiteralMatcher {
    pub fn new(needle: &str, case_insensitive: bool) -> Result<Self, BuildError> {
        let searcher = AhoCorasick::builder()
            .ascii_case_insensitive(case_insensitive)
            .build([needle])?;

        Ok(Self {
            needle: needle.to_string(),
            case_insensitive,
            searcher,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        // The empty needle is a substring of every text, including "".
        self.needle.is_empty() || self.searcher.is_match(text)
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_substring() {
        let matcher = LiteralMatcher::new("mispelled", false).unwrap();
        assert!(matcher.is_match("There is a mispelled word here."));
        assert!(!matcher.is_match("There is a MISPELLED word here."));
        assert!(!matcher.is_match("misspelled"));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let matcher = LiteralMatcher::new("crash", true).unwrap();
        assert!(matcher.is_match("I see a Crash when running this."));
        assert!(matcher.is_match("CRASH"));
        assert!(!matcher.is_match("crush"));
        assert!(matcher.is_case_insensitive());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let matcher = LiteralMatcher::new("a.b*", false).unwrap();
        assert!(matcher.is_match("see a.b* here"));
        assert!(!matcher.is_match("aXbbb"));
        assert_eq!(matcher.needle(), "a.b*");
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let matcher = LiteralMatcher::new("", false).unwrap();
        assert!(matcher.is_match("anything"));
        assert!(matcher.is_match(""));
    }

    #[test]
    fn test_unicode_needle() {
        let matcher = LiteralMatcher::new("fehlerhaft ü", false).unwrap();
        assert!(matcher.is_match("das ist fehlerhaft ü wirklich"));
    }
}
