//! Rule compilation.
//!
//! This module turns configuration text into something the classifier can run:
//! - [`parser`] - YAML document to an ordered [`RuleSet`] of [`LabelRule`](crate::ir::LabelRule)s
//! - [`pattern`] - raw pattern string to a [`CompiledMatcher`](crate::matcher::CompiledMatcher)
//!
//! # Examples
//!
//! ```rust
//! use issue_labeler::{compile_pattern, parse_rules, LabelerConfig};
//!
//! let rules = parse_rules("bug: \"/crash|exception/i\"\n")?;
//! let config = LabelerConfig::default();
//!
//! for rule in rules.iter() {
//!     for raw in rule.patterns() {
//!         let matcher = compile_pattern(raw, &config).unwrap();
//!         assert!(matcher.matches("Unhandled Exception in main"));
//!     }
//! }
//! # Ok::<(), issue_labeler::LabelerError>(())
//! ```

pub mod parser;
pub mod pattern;

pub use parser::{parse_rules, ConfigParser, RuleSet};
pub use pattern::{compile_pattern, Flags, PatternCompiler};
