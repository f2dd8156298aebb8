//! Pattern matchers evaluated against issue text.
//!
//! The matcher system separates compilation from evaluation:
//! - **Compilation**: [`compile_pattern`](crate::compiler::compile_pattern) turns a
//!   raw pattern string into a [`CompiledMatcher`] once per run
//! - **Evaluation**: [`CompiledMatcher::matches`] is a pure boolean test over the text
//!
//! Two matcher kinds exist:
//! - Regex, backed by [`regex::Regex`]
//! - Literal substring, backed by [`LiteralMatcher`] (Aho-Corasick)

pub mod compiled;
pub mod literal;

pub use compiled::CompiledMatcher;
pub use literal::LiteralMatcher;
