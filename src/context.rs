//! Read-only snapshot of the issue being classified.

use crate::config::IssueConfig;

/// The issue number and the text the rules are tested against.
///
/// Built once per run by the caller and passed by reference into the
/// classifier; it is never mutated.
///
/// # Examples
///
/// ```rust
/// use issue_labeler::{IssueConfig, IssueContext};
///
/// let body_only = IssueContext::from_issue(7, "Crash on start", Some("Stack trace below"), &IssueConfig::default());
/// assert_eq!(body_only.text(), "Stack trace below");
///
/// let with_title = IssueContext::from_issue(7, "Crash on start", None, &IssueConfig { include_title: true });
/// assert_eq!(with_title.text(), "Crash on start\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContext {
    id: u64,
    text: String,
}

impl IssueContext {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Assemble the text from an issue title and an optional body.
    ///
    /// A missing body is empty text. The title is only used when
    /// `include_title` is set.
    pub fn from_issue(id: u64, title: &str, body: Option<&str>, config: &IssueConfig) -> Self {
        let body = body.unwrap_or_default();
        let text = if config.include_title {
            format!("{title}\n{body}")
        } else {
            body.to_string()
        };
        Self { id, text }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
