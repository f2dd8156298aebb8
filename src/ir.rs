//! Intermediate representation for label rules.
//!
//! This module defines the data structures passed between the configuration
//! parser, the pattern compiler and the classifier.

use std::borrow::Cow;

/// Whether a pattern was written as `/body/flags` or as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Literal,
    Regex,
}

/// One label and the raw patterns that select it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelRule {
    pub label: Cow<'static, str>,
    pub patterns: Vec<Cow<'static, str>>,
}

impl LabelRule {
    pub fn new(label: String, patterns: Vec<String>) -> Self {
        Self {
            label: Cow::Owned(label),
            patterns: patterns.into_iter().map(Cow::Owned).collect(),
        }
    }

    pub fn new_static(label: &'static str, patterns: &[&'static str]) -> Self {
        Self {
            label: Cow::Borrowed(label),
            patterns: patterns.iter().map(|&p| Cow::Borrowed(p)).collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| &**p)
    }
}

/// A raw pattern split into its syntactic parts.
///
/// A pattern is a regex when it has the shape `^/(.+)/(.*)$`: a leading slash,
/// a non-empty body, a slash, and a (possibly empty) flag suffix. The split is
/// greedy, so `/a/b/i` has body `a/b` and flags `i`. Like `.` in that shape, no
/// part may contain a newline. Everything else is a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    pub raw: String,
    pub kind: PatternKind,
    pub body: String,
    pub flags: String,
}

impl PatternSpec {
    pub fn parse(raw: &str) -> Self {
        match split_delimited(raw) {
            Some((body, flags)) => Self {
                raw: raw.to_string(),
                kind: PatternKind::Regex,
                body: body.to_string(),
                flags: flags.to_string(),
            },
            None => Self {
                raw: raw.to_string(),
                kind: PatternKind::Literal,
                body: raw.to_string(),
                flags: String::new(),
            },
        }
    }

    pub fn is_regex(&self) -> bool {
        self.kind == PatternKind::Regex
    }
}

fn split_delimited(raw: &str) -> Option<(&str, &str)> {
    if raw.contains('\n') {
        return None;
    }

    let inner = raw.strip_prefix('/')?;
    let end = inner.rfind('/')?;
    let (body, flags) = (&inner[..end], &inner[end + 1..]);

    if body.is_empty() {
        None
    } else {
        Some((body, flags))
    }
}
