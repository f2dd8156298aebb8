//! Label classification.
//!
//! [`LabelClassifier`] compiles every pattern of every rule once, then tests the
//! compiled matchers against an [`IssueContext`]. It performs no I/O: the
//! result is a pure function of the rules, the configuration and the issue.
//!
//! # Examples
//!
//! ```rust
//! use issue_labeler::{parse_rules, IssueContext, LabelClassifier, LabelerConfig};
//!
//! let rules = parse_rules("bug: \"/crash|exception/i\"\nquestion: \"/\\\\?$/\"\n")?;
//! let classifier = LabelClassifier::from_rule_set(&rules, &LabelerConfig::default());
//!
//! let issue = IssueContext::new(1, "I see a Crash when running this.");
//! let result = classifier.classify(&issue);
//! assert_eq!(result.labels(), ["bug"]);
//! # Ok::<(), issue_labeler::LabelerError>(())
//! ```

use crate::compiler::{PatternCompiler, RuleSet};
use crate::config::LabelerConfig;
use crate::context::IssueContext;
use crate::diagnostics::{Diagnostics, PatternCompileError};
use crate::ir::LabelRule;
use crate::matcher::CompiledMatcher;
use std::collections::HashSet;
use tracing::debug;

/// Labels to apply, unique and in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    labels: Vec<String>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ClassificationResult {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    raw: String,
    matcher: CompiledMatcher,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    label: String,
    patterns: Vec<CompiledPattern>,
    /// Number of raw patterns, including the ones that failed to compile.
    declared: usize,
}

/// Compiled rules ready to classify issues.
#[derive(Debug, Clone)]
pub struct LabelClassifier {
    rules: Vec<CompiledRule>,
    short_circuit: bool,
    diagnostics: Diagnostics,
}

impl LabelClassifier {
    /// Compile `rules` with `config`.
    ///
    /// Patterns that fail to compile are recorded in [`diagnostics`](Self::diagnostics)
    /// and left out; their rule can still match through its other patterns.
    pub fn new(rules: &[LabelRule], config: &LabelerConfig) -> Self {
        let compiler = PatternCompiler::new(config);
        let mut diagnostics = Diagnostics::new();
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let mut patterns = Vec::with_capacity(rule.patterns.len());

            for raw in rule.patterns() {
                match compiler.compile(raw) {
                    Ok(matcher) => patterns.push(CompiledPattern {
                        raw: raw.to_string(),
                        matcher,
                    }),
                    Err(kind) => diagnostics.record(PatternCompileError {
                        label: rule.label().to_string(),
                        pattern: raw.to_string(),
                        kind,
                    }),
                }
            }

            compiled.push(CompiledRule {
                label: rule.label().to_string(),
                patterns,
                declared: rule.patterns.len(),
            });
        }

        Self {
            rules: compiled,
            short_circuit: config.matching.short_circuit,
            diagnostics,
        }
    }

    pub fn from_rule_set(rule_set: &RuleSet, config: &LabelerConfig) -> Self {
        Self::new(&rule_set.rules, config)
    }

    /// Pattern compilation problems found while building the classifier.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Number of patterns that compiled successfully.
    pub fn pattern_count(&self) -> usize {
        self.rules.iter().map(|r| r.patterns.len()).sum()
    }

    /// Labels whose rules have no usable pattern left.
    pub fn unusable_labels(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|r| r.patterns.is_empty() && r.declared > 0)
            .map(|r| r.label.as_str())
    }

    /// Test every rule, in declaration order, against the issue text.
    pub fn classify(&self, issue: &IssueContext) -> ClassificationResult {
        let text = issue.text();
        let mut result = ClassificationResult::new();
        let mut satisfied: HashSet<&str> = HashSet::new();

        for rule in &self.rules {
            if satisfied.contains(rule.label.as_str()) {
                continue;
            }

            if self.rule_matches(rule, text) {
                satisfied.insert(rule.label.as_str());
                result.push(&rule.label);
            }
        }

        debug!(
            "Issue #{} matched {} of {} rules",
            issue.id(),
            result.len(),
            self.rules.len()
        );
        result
    }

    fn rule_matches(&self, rule: &CompiledRule, text: &str) -> bool {
        let mut matched = false;

        for pattern in &rule.patterns {
            if pattern.matcher.matches(text) {
                debug!("Pattern '{}' matched, label '{}'", pattern.raw, rule.label);
                matched = true;
                if self.short_circuit {
                    break;
                }
            } else {
                debug!(
                    "Pattern '{}' does not match the issue body. Skipping...",
                    pattern.raw
                );
            }
        }

        matched
    }
}

/// Compile `rules` and classify `issue` in one step.
///
/// Returns the labels together with the pattern diagnostics.
pub fn classify(
    rules: &[LabelRule],
    issue: &IssueContext,
    config: &LabelerConfig,
) -> (ClassificationResult, Diagnostics) {
    let classifier = LabelClassifier::new(rules, config);
    let result = classifier.classify(issue);
    (result, classifier.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LiteralMode;
    use crate::diagnostics::PatternErrorKind;

    fn run(rules: &[LabelRule], text: &str) -> ClassificationResult {
        classify(rules, &IssueContext::new(1, text), &LabelerConfig::default()).0
    }

    #[test]
    fn test_result_push_is_set_like() {
        let mut result = ClassificationResult::new();
        assert!(result.push("bug"));
        assert!(result.push("question"));
        assert!(!result.push("bug"));

        assert_eq!(result.labels(), ["bug", "question"]);
        assert_eq!(result.len(), 2);
        assert!(result.contains("question"));
        assert!(!result.contains("docs"));
    }

    #[test]
    fn test_first_match_only_labels_once() {
        let rules = vec![LabelRule::new_static("bug", &["/crash/i", "/error/i"])];
        let result = run(&rules, "Crash with error");
        assert_eq!(result.labels(), ["bug"]);
    }

    #[test]
    fn test_output_follows_rule_order() {
        let rules = vec![
            LabelRule::new_static("question", &[r"/\?$/"]),
            LabelRule::new_static("bug", &["/crash/i"]),
            LabelRule::new_static("docs", &["readme"]),
        ];
        let result = run(&rules, "readme says it will crash?");
        assert_eq!(result.labels(), ["question", "bug", "docs"]);
    }

    #[test]
    fn test_duplicate_rules_and_patterns_do_not_duplicate_labels() {
        let rules = vec![
            LabelRule::new_static("bug", &["crash", "crash"]),
            LabelRule::new_static("bug", &["/CRASH/i"]),
        ];
        let result = run(&rules, "crash");
        assert_eq!(result.labels(), ["bug"]);
    }

    #[test]
    fn test_failed_pattern_does_not_block_siblings() {
        let rules = vec![
            LabelRule::new_static("bug", &["/foo/z", "/(/", "/crash/"]),
            LabelRule::new_static("x", &["/(/"]),
        ];
        let issue = IssueContext::new(3, "crash and (");
        let classifier = LabelClassifier::new(&rules, &LabelerConfig::default());

        assert_eq!(classifier.classify(&issue).labels(), ["bug"]);
        assert_eq!(classifier.diagnostics().len(), 3);
        assert_eq!(classifier.pattern_count(), 1);
        assert_eq!(classifier.unusable_labels().collect::<Vec<_>>(), vec!["x"]);

        let kinds: Vec<_> = classifier
            .diagnostics()
            .pattern_errors()
            .map(|e| e.kind.clone())
            .collect();
        assert_eq!(kinds[0], PatternErrorKind::UnsupportedFlag('z'));
        assert!(matches!(kinds[1], PatternErrorKind::InvalidRegex(_)));
    }

    #[test]
    fn test_literal_modes_change_results() {
        let rules = vec![LabelRule::new_static("typo", &["mispelled"])];
        let issue = IssueContext::new(1, "A Mispelled word.");

        let (sensitive, _) = classify(&rules, &issue, &LabelerConfig::default());
        assert!(sensitive.is_empty());

        let config = LabelerConfig::default().with_literal_mode(LiteralMode::CaseInsensitive);
        let (insensitive, _) = classify(&rules, &issue, &config);
        assert_eq!(insensitive.labels(), ["typo"]);

        let (disabled, diagnostics) = classify(&rules, &issue, &LabelerConfig::regex_only());
        assert!(disabled.is_empty());
        assert_eq!(diagnostics.pattern_errors().count(), 1);
    }

    #[test]
    fn test_short_circuit_does_not_change_result() {
        let rules = vec![
            LabelRule::new_static("bug", &["/crash/", "/panic/"]),
            LabelRule::new_static("perf", &["slow"]),
        ];
        let issue = IssueContext::new(1, "crash and panic, also slow");

        let (with, _) = classify(&rules, &issue, &LabelerConfig::default());
        let (without, _) = classify(
            &rules,
            &issue,
            &LabelerConfig::default().with_short_circuit(false),
        );
        assert_eq!(with, without);
        assert_eq!(with.labels(), ["bug", "perf"]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let rules = vec![
            LabelRule::new_static("b", &["x"]),
            LabelRule::new_static("a", &["x"]),
            LabelRule::new_static("c", &["x"]),
        ];
        let classifier = LabelClassifier::new(&rules, &LabelerConfig::default());
        let issue = IssueContext::new(1, "x");

        let first = classifier.classify(&issue);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&issue), first);
        }
        assert_eq!(first.labels(), ["b", "a", "c"]);
    }

    #[test]
    fn test_no_rules_no_labels() {
        let result = run(&[], "anything");
        assert!(result.is_empty());
    }
}
