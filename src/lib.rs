//! # Issue Labeler
//!
//! Decides which labels apply to a newly opened issue by testing its text
//! against a declarative set of label rules.
//!
//! A configuration document maps each label to one or more patterns:
//!
//! ```yaml
//! bug: "/crash|exception/i"     # regex, case-insensitive
//! question: "/\\?$/"            # regex
//! typo:                         # a list of patterns
//!   - mispelled
//!   - "/\\bteh\\b/"
//! ```
//!
//! A pattern of the form `/body/flags` is a regex; anything else is a literal
//! substring. A label is applied when at least one of its patterns matches.
//!
//! ## Quick Start
//!
//! ```rust
//! use issue_labeler::{parse_rules, IssueContext, LabelClassifier, LabelerConfig};
//!
//! let rules = parse_rules("bug: \"/crash|exception/i\"\nquestion: \"/\\\\?$/\"\n")?;
//! let classifier = LabelClassifier::from_rule_set(&rules, &LabelerConfig::default());
//!
//! let issue = IssueContext::new(42, "How do I configure this?");
//! assert_eq!(classifier.classify(&issue).labels(), ["question"]);
//! # Ok::<(), issue_labeler::LabelerError>(())
//! ```
//!
//! ## Running Against GitHub
//!
//! ```rust,ignore
//! use issue_labeler::{run_once, Collaborators, FileConfigSource, GitHubEventFile, GitHubLabelSink};
//!
//! let report = run_once(
//!     &Collaborators { source: &files, events: &event_file, sink: &github },
//!     ".github/labeler.yml",
//!     &LabelerConfig::default(),
//! )?;
//! ```

pub mod classifier;
pub mod compiler;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod github;
pub mod ir;
pub mod matcher;
pub mod runner;
pub mod sink;
pub mod source;
pub mod telemetry;

// Classification
pub use classifier::{classify, ClassificationResult, LabelClassifier};
pub use context::IssueContext;

// Compilation
pub use compiler::{compile_pattern, parse_rules, ConfigParser, Flags, PatternCompiler, RuleSet};
pub use ir::{LabelRule, PatternKind, PatternSpec};
pub use matcher::{CompiledMatcher, LiteralMatcher};

// Configuration, errors and diagnostics
pub use config::{IssueConfig, LabelerConfig, LiteralMode, MatchingConfig, RegexConfig};
pub use diagnostics::{
    ConfigRuleError, Diagnostic, Diagnostics, PatternCompileError, PatternErrorKind,
};
pub use error::{LabelerError, Result};

// I/O collaborators
pub use event::{parse_event_payload, EventContextProvider, GitHubEventFile};
pub use github::{GitHubApi, Repository, DEFAULT_API_URL};
pub use runner::{run_once, Collaborators, RunOutcome, RunReport};
pub use sink::{DryRunSink, GitHubLabelSink, LabelSink};
pub use source::{decode_contents, ConfigSource, FileConfigSource, GitHubContentsSource};
