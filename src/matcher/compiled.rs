//! Executable predicate produced from one pattern.

use super::literal::LiteralMatcher;
use crate::ir::PatternKind;
use regex::Regex;

/// A compiled pattern, ready to be tested against issue text.
///
/// Regex matchers are tested against the issue text, never against their own
/// source.
///
/// # Examples
///
/// ```rust
/// use issue_labeler::{compile_pattern, LabelerConfig};
///
/// let matcher = compile_pattern("/crash|exception/i", &LabelerConfig::default()).unwrap();
/// assert!(matcher.matches("I see a Crash when running this."));
/// assert!(!matcher.matches("Works as expected."));
/// ```
#[derive(Debug, Clone)]
pub enum CompiledMatcher {
    Regex(Regex),
    Literal(LiteralMatcher),
}

impl CompiledMatcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            CompiledMatcher::Regex(regex) => regex.is_match(text),
            CompiledMatcher::Literal(literal) => literal.is_match(text),
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            CompiledMatcher::Regex(_) => PatternKind::Regex,
            CompiledMatcher::Literal(_) => PatternKind::Literal,
        }
    }
}
