//! Triggering event metadata.
//!
//! GitHub Actions writes the webhook payload of the triggering event to the
//! file named by `GITHUB_EVENT_PATH`. For `issues` events it carries an
//! `issue` object with `number`, `title` and `body`.

use crate::config::IssueConfig;
use crate::context::IssueContext;
use crate::error::{LabelerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub trait EventContextProvider {
    /// Snapshot of the issue that triggered this run.
    ///
    /// # Errors
    /// [`LabelerError::IssueContextMissing`] if the event has no issue.
    fn issue_context(&self) -> Result<IssueContext>;
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    issue: Option<IssuePayload>,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

/// Build an [`IssueContext`] from a webhook payload.
pub fn parse_event_payload(json: &str, config: &IssueConfig) -> Result<IssueContext> {
    let payload: EventPayload = serde_json::from_str(json).map_err(|e| {
        LabelerError::IssueContextMissing(format!("event payload is not valid JSON: {e}"))
    })?;

    let issue = payload
        .issue
        .ok_or_else(|| LabelerError::IssueContextMissing("Issue not found".to_string()))?;

    Ok(IssueContext::from_issue(
        issue.number,
        issue.title.as_deref().unwrap_or_default(),
        issue.body.as_deref(),
        config,
    ))
}

/// Reads the event payload from a file, normally `GITHUB_EVENT_PATH`.
#[derive(Debug, Clone)]
pub struct GitHubEventFile {
    path: PathBuf,
    config: IssueConfig,
}

impl GitHubEventFile {
    pub fn new(path: impl Into<PathBuf>, config: IssueConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }
}

impl EventContextProvider for GitHubEventFile {
    fn issue_context(&self) -> Result<IssueContext> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            LabelerError::IssueContextMissing(format!(
                "cannot read event payload {}: {e}",
                self.path.display()
            ))
        })?;
        parse_event_payload(&json, &self.config)
    }
}
