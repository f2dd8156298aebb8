//! Pattern compilation: raw pattern string to [`CompiledMatcher`].

use crate::config::{LabelerConfig, LiteralMode, RegexConfig};
use crate::diagnostics::PatternErrorKind;
use crate::ir::{PatternKind, PatternSpec};
use crate::matcher::{CompiledMatcher, LiteralMatcher};
use regex::RegexBuilder;

/// Validated regex modifiers taken from the `/body/flags` suffix.
///
/// | Flag | Effect |
/// |------|--------|
/// | `i` | Case-insensitive |
/// | `m` | `^`/`$` match at line boundaries |
/// | `s` | `.` matches newline |
/// | `g` | No-op (matching is a boolean test) |
/// | `u` | No-op (patterns are always Unicode-aware) |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

impl Flags {
    /// Parse a flag suffix. Unknown or repeated flags are rejected.
    pub fn parse(suffix: &str) -> Result<Self, PatternErrorKind> {
        let mut flags = Flags::default();
        let mut seen = String::with_capacity(suffix.len());

        for flag in suffix.chars() {
            if seen.contains(flag) {
                return Err(PatternErrorKind::DuplicateFlag(flag));
            }
            seen.push(flag);

            match flag {
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_matches_new_line = true,
                'g' | 'u' => {}
                other => return Err(PatternErrorKind::UnsupportedFlag(other)),
            }
        }

        Ok(flags)
    }
}

/// Compiles pattern strings with a fixed configuration.
///
/// # Examples
///
/// ```rust
/// use issue_labeler::{LabelerConfig, PatternCompiler};
///
/// let config = LabelerConfig::default();
/// let compiler = PatternCompiler::new(&config);
///
/// let question = compiler.compile(r"/\?$/").unwrap();
/// assert!(question.matches("How do I configure this?"));
///
/// assert!(compiler.compile("/foo/z").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    literal_mode: LiteralMode,
    regex: RegexConfig,
}

impl PatternCompiler {
    pub fn new(config: &LabelerConfig) -> Self {
        Self {
            literal_mode: config.matching.literal_mode,
            regex: config.regex.clone(),
        }
    }

    /// Compile a raw pattern. The empty string is a literal that matches any text.
    pub fn compile(&self, raw: &str) -> Result<CompiledMatcher, PatternErrorKind> {
        self.compile_spec(&PatternSpec::parse(raw))
    }

    pub fn compile_spec(&self, spec: &PatternSpec) -> Result<CompiledMatcher, PatternErrorKind> {
        match spec.kind {
            PatternKind::Regex => self.compile_regex(&spec.body, &spec.flags),
            PatternKind::Literal => self.compile_literal(&spec.body),
        }
    }

    fn compile_regex(&self, body: &str, suffix: &str) -> Result<CompiledMatcher, PatternErrorKind> {
        let flags = Flags::parse(suffix)?;

        RegexBuilder::new(body)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .size_limit(self.regex.size_limit)
            .nest_limit(self.regex.nest_limit)
            .build()
            .map(CompiledMatcher::Regex)
            .map_err(|e| PatternErrorKind::InvalidRegex(e.to_string()))
    }

    fn compile_literal(&self, needle: &str) -> Result<CompiledMatcher, PatternErrorKind> {
        let case_insensitive = match self.literal_mode {
            LiteralMode::CaseSensitive => false,
            LiteralMode::CaseInsensitive => true,
            LiteralMode::Disabled => return Err(PatternErrorKind::LiteralDisabled),
        };

        LiteralMatcher::new(needle, case_insensitive)
            .map(CompiledMatcher::Literal)
            .map_err(|e| PatternErrorKind::InvalidLiteral(e.to_string()))
    }
}

/// Compile a single pattern string.
pub fn compile_pattern(
    raw: &str,
    config: &LabelerConfig,
) -> Result<CompiledMatcher, PatternErrorKind> {
    PatternCompiler::new(config).compile(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(raw: &str) -> Result<CompiledMatcher, PatternErrorKind> {
        compile_pattern(raw, &LabelerConfig::default())
    }

    #[test]
    fn test_flags_parse() {
        let flags = Flags::parse("ims").unwrap();
        assert!(flags.case_insensitive);
        assert!(flags.multi_line);
        assert!(flags.dot_matches_new_line);

        assert_eq!(Flags::parse("").unwrap(), Flags::default());
        assert_eq!(Flags::parse("gu").unwrap(), Flags::default());
    }

    #[test]
    fn test_flags_reject_unknown_and_duplicates() {
        assert_eq!(Flags::parse("z"), Err(PatternErrorKind::UnsupportedFlag('z')));
        assert_eq!(Flags::parse("iy"), Err(PatternErrorKind::UnsupportedFlag('y')));
        assert_eq!(Flags::parse("ii"), Err(PatternErrorKind::DuplicateFlag('i')));
    }

    #[test]
    fn test_case_insensitive_regex() {
        let matcher = compile("/crash|exception/i").unwrap();
        assert_eq!(matcher.kind(), PatternKind::Regex);
        assert!(matcher.matches("I see a Crash when running this."));
        assert!(matcher.matches("NullPointerEXCEPTION thrown"));
        assert!(!matcher.matches("Works fine."));
    }

    #[test]
    fn test_regex_is_case_sensitive_without_flag() {
        let matcher = compile("/crash/").unwrap();
        assert!(matcher.matches("a crash"));
        assert!(!matcher.matches("a Crash"));
    }

    #[test]
    fn test_regex_is_not_tested_against_its_source() {
        // The source "/crash/" contains "crash"; the issue text does not.
        let matcher = compile("/crash/").unwrap();
        assert!(!matcher.matches("everything works as expected"));

        let digits = compile(r"/^\d+$/").unwrap();
        assert!(digits.matches("12345"));
    }

    #[test]
    fn test_end_anchor_without_multiline() {
        let matcher = compile(r"/\?$/").unwrap();
        assert!(matcher.matches("How do I configure this?"));
        assert!(!matcher.matches("Is this right?\nThanks"));
    }

    #[test]
    fn test_multiline_flag() {
        let matcher = compile(r"/\?$/m").unwrap();
        assert!(matcher.matches("Is this right?\nThanks"));
    }

    #[test]
    fn test_dot_all_flag() {
        let plain = compile("/steps.*expected/").unwrap();
        let dot_all = compile("/steps.*expected/s").unwrap();
        let text = "steps to reproduce\nexpected behaviour";

        assert!(!plain.matches(text));
        assert!(dot_all.matches(text));
    }

    #[test]
    fn test_unsupported_flag_is_error() {
        assert_eq!(
            compile("/foo/z").unwrap_err(),
            PatternErrorKind::UnsupportedFlag('z')
        );
    }

    #[test]
    fn test_invalid_regex_body() {
        match compile("/(/").unwrap_err() {
            PatternErrorKind::InvalidRegex(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected InvalidRegex, got {other:?}"),
        }
    }

    #[test]
    fn test_regex_size_limit() {
        let config = LabelerConfig::default().with_regex_size_limit(16);
        let result = compile_pattern(r"/\w{100}/", &config);
        assert!(matches!(result, Err(PatternErrorKind::InvalidRegex(_))));
    }

    #[test]
    fn test_literal_modes() {
        let text = "There is a Mispelled word here.";

        let sensitive = compile("mispelled").unwrap();
        assert_eq!(sensitive.kind(), PatternKind::Literal);
        assert!(!sensitive.matches(text));

        let config = LabelerConfig::default().with_literal_mode(LiteralMode::CaseInsensitive);
        let insensitive = compile_pattern("mispelled", &config).unwrap();
        assert!(insensitive.matches(text));

        let strict = LabelerConfig::regex_only();
        assert_eq!(
            compile_pattern("mispelled", &strict).unwrap_err(),
            PatternErrorKind::LiteralDisabled
        );
    }

    #[test]
    fn test_regex_still_compiles_when_literals_disabled() {
        let strict = LabelerConfig::regex_only();
        assert!(compile_pattern("/bug/", &strict).is_ok());
    }

    #[test]
    fn test_empty_pattern_matches_any_text() {
        let matcher = compile("").unwrap();
        assert_eq!(matcher.kind(), PatternKind::Literal);
        assert!(matcher.matches("hello"));
        assert!(matcher.matches(""));

        let strict = LabelerConfig::regex_only();
        assert_eq!(
            compile_pattern("", &strict).unwrap_err(),
            PatternErrorKind::LiteralDisabled
        );
    }

    #[test]
    fn test_slash_only_strings_are_literals() {
        let matcher = compile("//").unwrap();
        assert_eq!(matcher.kind(), PatternKind::Literal);
        assert!(matcher.matches("see https://example.com"));
    }
}
