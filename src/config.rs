//! Configuration for rule compilation and classification.
//!
//! [`LabelerConfig`] groups the knobs that change how patterns are compiled and
//! how the issue text is assembled. All sub-configurations have sensible
//! defaults, so most callers only need `LabelerConfig::default()`.
//!
//! # Examples
//!
//! ```rust
//! use issue_labeler::{LabelerConfig, LiteralMode};
//!
//! // Default: literal patterns are case-sensitive substrings
//! let config = LabelerConfig::default();
//! assert_eq!(config.matching.literal_mode, LiteralMode::CaseSensitive);
//!
//! // Only `/regex/flags` patterns are honoured
//! let strict = LabelerConfig::regex_only();
//! assert_eq!(strict.matching.literal_mode, LiteralMode::Disabled);
//! ```

use std::fmt;
use std::str::FromStr;

/// How patterns that are not written as `/body/flags` are treated.
///
/// | Mode | `"crash"` vs `"Crash here"` | Notes |
/// |------|-----------------------------|-------|
/// | `CaseSensitive` | no match | Default |
/// | `CaseInsensitive` | match | ASCII case folding |
/// | `Disabled` | never evaluated | Reported as a diagnostic |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralMode {
    /// Plain substring test.
    #[default]
    CaseSensitive,

    /// Substring test ignoring ASCII case.
    CaseInsensitive,

    /// Non-regex patterns are rejected and never match.
    Disabled,
}

impl fmt::Display for LiteralMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralMode::CaseSensitive => "case-sensitive",
            LiteralMode::CaseInsensitive => "case-insensitive",
            LiteralMode::Disabled => "disabled",
        };
        f.write_str(name)
    }
}

impl FromStr for LiteralMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "case-sensitive" | "sensitive" => Ok(LiteralMode::CaseSensitive),
            "case-insensitive" | "insensitive" => Ok(LiteralMode::CaseInsensitive),
            "disabled" | "off" | "none" => Ok(LiteralMode::Disabled),
            other => Err(format!(
                "unknown literal mode '{other}' (expected case-sensitive, case-insensitive or disabled)"
            )),
        }
    }
}

/// Pattern matching behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Treatment of non-regex patterns.
    ///
    /// **Default**: `CaseSensitive`
    pub literal_mode: LiteralMode,

    /// Stop evaluating a rule's patterns after the first match.
    ///
    /// Turning this off never changes the result, only how many patterns show
    /// up in debug logs.
    ///
    /// **Default**: true
    pub short_circuit: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            literal_mode: LiteralMode::CaseSensitive,
            short_circuit: true,
        }
    }
}

/// Limits handed to the regex compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexConfig {
    /// Approximate upper bound on the compiled size of one regex, in bytes.
    ///
    /// **Default**: 1MB
    pub size_limit: usize,

    /// Maximum nesting depth of a regex body.
    ///
    /// **Default**: 100
    pub nest_limit: u32,
}

impl Default for RegexConfig {
    fn default() -> Self {
        Self {
            size_limit: 1024 * 1024,
            nest_limit: 100,
        }
    }
}

/// How the text under test is assembled from the issue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueConfig {
    /// Prepend the issue title to the body.
    ///
    /// **Default**: false (body only)
    pub include_title: bool,
}

/// Complete labeler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelerConfig {
    pub matching: MatchingConfig,
    pub regex: RegexConfig,
    pub issue: IssueConfig,
}

impl LabelerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `/body/flags` patterns are evaluated.
    pub fn regex_only() -> Self {
        Self {
            matching: MatchingConfig {
                literal_mode: LiteralMode::Disabled,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Case-insensitive literals over title and body.
    pub fn lenient() -> Self {
        Self {
            matching: MatchingConfig {
                literal_mode: LiteralMode::CaseInsensitive,
                ..Default::default()
            },
            issue: IssueConfig {
                include_title: true,
            },
            ..Default::default()
        }
    }

    pub fn with_literal_mode(mut self, mode: LiteralMode) -> Self {
        self.matching.literal_mode = mode;
        self
    }

    pub fn with_short_circuit(mut self, enabled: bool) -> Self {
        self.matching.short_circuit = enabled;
        self
    }

    pub fn with_title(mut self, include_title: bool) -> Self {
        self.issue.include_title = include_title;
        self
    }

    pub fn with_regex_size_limit(mut self, size_limit: usize) -> Self {
        self.regex.size_limit = size_limit;
        self
    }
}
