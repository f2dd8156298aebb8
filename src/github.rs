//! Minimal blocking client for the GitHub REST endpoints the labeler needs.

use crate::error::Result;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// `owner/name` of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Parse the `GITHUB_REPOSITORY` form, `owner/name`.
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Authenticated handle on one repository.
#[derive(Debug, Clone)]
pub struct GitHubApi {
    client: Client,
    api_url: String,
    repository: Repository,
    token: String,
}

impl GitHubApi {
    pub fn new(api_url: &str, repository: Repository, token: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(concat!("issue-labeler/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repository,
            token: token.into(),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            self.repository.owner,
            self.repository.name,
            path.trim_start_matches('/')
        )
    }

    pub fn labels_url(&self, issue: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.api_url, self.repository.owner, self.repository.name, issue
        )
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.token)
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).bearer_auth(&self.token)
    }
}

pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));

    match message {
        Some(message) => format!("{status}: {message}"),
        None => status.to_string(),
    }
}
