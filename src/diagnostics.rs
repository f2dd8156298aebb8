//! Non-fatal problems found while parsing rules and compiling patterns.
//!
//! A diagnostic is isolated to the smallest unit it affects: a dropped rule or
//! a pattern that never matches. Diagnostics are collected, logged and handed
//! back to the caller next to the classification result.

use std::fmt;
use thiserror::Error;
use tracing::warn;

/// A rule whose value has an unsupported shape. The rule is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Rule '{label}' skipped: {reason}")]
pub struct ConfigRuleError {
    pub label: String,
    pub reason: String,
}

/// Why a single pattern could not be turned into a matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternErrorKind {
    UnsupportedFlag(char),
    DuplicateFlag(char),
    InvalidRegex(String),
    /// The literal searcher could not be built.
    InvalidLiteral(String),
    /// Literal patterns were switched off by configuration.
    LiteralDisabled,
}

impl fmt::Display for PatternErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternErrorKind::UnsupportedFlag(flag) => {
                write!(f, "unsupported regex flag '{flag}'")
            }
            PatternErrorKind::DuplicateFlag(flag) => write!(f, "duplicate regex flag '{flag}'"),
            PatternErrorKind::InvalidRegex(msg) => write!(f, "invalid regex: {msg}"),
            PatternErrorKind::InvalidLiteral(msg) => write!(f, "invalid literal: {msg}"),
            PatternErrorKind::LiteralDisabled => {
                write!(f, "not a /regex/ and literal patterns are disabled")
            }
        }
    }
}

/// A pattern that failed to compile. It is treated as never matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Pattern '{pattern}' for label '{label}' ignored: {kind}")]
pub struct PatternCompileError {
    pub label: String,
    pub pattern: String,
    pub kind: PatternErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Rule(ConfigRuleError),
    Pattern(PatternCompileError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Rule(err) => err.fmt(f),
            Diagnostic::Pattern(err) => err.fmt(f),
        }
    }
}

impl From<ConfigRuleError> for Diagnostic {
    fn from(err: ConfigRuleError) -> Self {
        Diagnostic::Rule(err)
    }
}

impl From<PatternCompileError> for Diagnostic {
    fn from(err: PatternCompileError) -> Self {
        Diagnostic::Pattern(err)
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a warning.
    pub fn record(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn rule_errors(&self) -> impl Iterator<Item = &ConfigRuleError> {
        self.entries.iter().filter_map(|d| match d {
            Diagnostic::Rule(err) => Some(err),
            Diagnostic::Pattern(_) => None,
        })
    }

    pub fn pattern_errors(&self) -> impl Iterator<Item = &PatternCompileError> {
        self.entries.iter().filter_map(|d| match d {
            Diagnostic::Pattern(err) => Some(err),
            Diagnostic::Rule(_) => None,
        })
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
