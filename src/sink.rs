//! Where computed labels go.

use crate::error::{LabelerError, Result};
use crate::github::{status_error, GitHubApi};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};

pub trait LabelSink {
    /// Add `labels` to issue `issue`. Never called with an empty slice.
    ///
    /// # Errors
    /// [`LabelerError::LabelApply`] if the labels could not be applied.
    fn apply(&self, issue: u64, labels: &[String]) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

/// Posts labels with `POST /repos/{owner}/{repo}/issues/{n}/labels`.
///
/// The endpoint is additive: labels already on the issue are kept.
#[derive(Debug, Clone)]
pub struct GitHubLabelSink {
    api: GitHubApi,
}

impl GitHubLabelSink {
    pub fn new(api: GitHubApi) -> Self {
        Self { api }
    }
}

impl LabelSink for GitHubLabelSink {
    fn apply(&self, issue: u64, labels: &[String]) -> Result<()> {
        let apply_error = |reason: String| LabelerError::LabelApply {
            issue,
            labels: labels.to_vec(),
            reason,
        };

        let url = self.api.labels_url(issue);
        debug!("Posting {} labels to {url}", labels.len());

        let response = self
            .api
            .post(&url)
            .json(&AddLabelsRequest { labels })
            .send()
            .map_err(|e| apply_error(e.to_string()))?;

        let status = response.status();
        let body = if status.is_success() {
            String::new()
        } else {
            response.text().unwrap_or_default()
        };

        check_apply_response(status, &body).map_err(apply_error)
    }
}

fn check_apply_response(status: StatusCode, body: &str) -> std::result::Result<(), String> {
    if status.is_success() {
        Ok(())
    } else {
        Err(status_error(status, body))
    }
}

/// Logs the labels instead of applying them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSink;

impl LabelSink for DryRunSink {
    fn apply(&self, issue: u64, labels: &[String]) -> Result<()> {
        info!("Dry run: would add labels {labels:?} to issue #{issue}");
        Ok(())
    }
}
