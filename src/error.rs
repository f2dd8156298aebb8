//! Error types for the issue labeler.
//!
//! Only run-aborting failures live here. Per-rule and per-pattern problems are
//! recorded as [`Diagnostic`](crate::diagnostics::Diagnostic)s and never surface
//! as an `Err`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LabelerError>;

/// A failure that aborts the run and is reported to the operator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelerError {
    /// The configuration document could not be fetched or read.
    #[error("Failed to load configuration '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    /// The configuration document is not valid structured data.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The triggering event carries no issue.
    #[error("Issue context missing: {0}")]
    IssueContextMissing(String),

    /// The label sink rejected the computed labels. The labels are kept so
    /// the classification can still be reported.
    #[error("Failed to apply labels {labels:?} to issue #{issue}: {reason}")]
    LabelApply {
        issue: u64,
        labels: Vec<String>,
        reason: String,
    },

    /// Transport-level failure talking to the hosting platform.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl LabelerError {
    pub fn config_load(path: impl Into<String>, reason: impl ToString) -> Self {
        LabelerError::ConfigLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for LabelerError {
    fn from(err: serde_yaml::Error) -> Self {
        LabelerError::ConfigParse(err.to_string())
    }
}

impl From<reqwest::Error> for LabelerError {
    fn from(err: reqwest::Error) -> Self {
        LabelerError::Http(err.to_string())
    }
}
