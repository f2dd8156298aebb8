//! Where the configuration document comes from.
//!
//! The classifier only needs decoded text; a [`ConfigSource`] hides whether it
//! was read from the checked-out workspace or fetched through the GitHub
//! contents API.

use crate::error::{LabelerError, Result};
use crate::github::{status_error, GitHubApi};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub trait ConfigSource {
    /// Return the decoded document at `path`.
    ///
    /// # Errors
    /// [`LabelerError::ConfigLoad`] if the path does not exist or cannot be read.
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Reads the document from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileConfigSource {
    root: Option<PathBuf>,
}

impl FileConfigSource {
    /// Resolve paths against the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`, e.g. `GITHUB_WORKSPACE`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl ConfigSource for FileConfigSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let full_path = match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        };
        debug!("Reading configuration from {}", full_path.display());

        fs::read_to_string(&full_path).map_err(|e| LabelerError::config_load(path, e))
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(rename = "type")]
    kind: Option<String>,
    content: Option<String>,
    encoding: Option<String>,
}

/// Fetches the document through `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone)]
pub struct GitHubContentsSource {
    api: GitHubApi,
    git_ref: Option<String>,
}

impl GitHubContentsSource {
    pub fn new(api: GitHubApi) -> Self {
        Self { api, git_ref: None }
    }

    /// Read the file at a commit, branch or tag instead of the default branch.
    pub fn at_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }
}

impl ConfigSource for GitHubContentsSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let url = self.api.contents_url(path);
        debug!("Fetching configuration from {url}");

        let mut request = self.api.get(&url);
        if let Some(git_ref) = &self.git_ref {
            request = request.query(&[("ref", git_ref)]);
        }

        let response = request
            .send()
            .map_err(|e| LabelerError::config_load(path, e))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| LabelerError::config_load(path, e))?;

        contents_from_response(status, &body)
            .map_err(|reason| LabelerError::config_load(path, reason))
    }
}

/// Turn a contents API response into the decoded document text.
fn contents_from_response(status: StatusCode, body: &str) -> std::result::Result<String, String> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }

    let contents: ContentsResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;

    if let Some(kind) = contents.kind.as_deref() {
        if kind != "file" {
            return Err(format!("expected a file, found a {kind}"));
        }
    }

    decode_contents(
        contents.content.as_deref().unwrap_or_default(),
        contents.encoding.as_deref(),
    )
}

/// Decode the `content` field of a contents API response.
///
/// GitHub wraps base64 content at 60 columns, so whitespace is stripped first.
pub fn decode_contents(
    content: &str,
    encoding: Option<&str>,
) -> std::result::Result<String, String> {
    match encoding {
        Some("base64") => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = STANDARD
                .decode(compact)
                .map_err(|e| format!("invalid base64 content: {e}"))?;
            String::from_utf8(bytes).map_err(|e| format!("content is not UTF-8: {e}"))
        }
        None | Some("utf-8") | Some("") => Ok(content.to_string()),
        Some(other) => Err(format!("unsupported content encoding '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_file_source_reads_document() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bug: \"/crash/i\"").unwrap();

        let text = FileConfigSource::new()
            .fetch(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(text, "bug: \"/crash/i\"\n");
    }

    #[test]
    fn test_file_source_with_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(".github/labeler.yml"), "docs: readme\n").unwrap();

        let source = FileConfigSource::with_root(dir.path());
        assert_eq!(source.fetch(".github/labeler.yml").unwrap(), "docs: readme\n");
    }

    #[test]
    fn test_missing_file_is_config_load_error() {
        let dir = TempDir::new().unwrap();
        let source = FileConfigSource::with_root(dir.path());

        match source.fetch("missing.yml").unwrap_err() {
            LabelerError::ConfigLoad { path, .. } => assert_eq!(path, "missing.yml"),
            other => panic!("Expected ConfigLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_base64_with_line_breaks() {
        // "bug: crash\n" wrapped as the API does
        let content = "YnVnOiBj\ncmFzaAo=\n";
        assert_eq!(
            decode_contents(content, Some("base64")).unwrap(),
            "bug: crash\n"
        );
    }

    #[test]
    fn test_contents_response_file() {
        let body = r#"{"type": "file", "encoding": "base64", "content": "YnVnOiBj\ncmFzaAo=\n"}"#;
        assert_eq!(
            contents_from_response(StatusCode::OK, body).unwrap(),
            "bug: crash\n"
        );
    }

    #[test]
    fn test_contents_response_rejects_directory() {
        let body = r#"{"type": "dir"}"#;
        assert_eq!(
            contents_from_response(StatusCode::OK, body).unwrap_err(),
            "expected a file, found a dir"
        );
    }

    #[test]
    fn test_contents_response_error_status() {
        let body = r#"{"message": "Not Found"}"#;
        assert_eq!(
            contents_from_response(StatusCode::NOT_FOUND, body).unwrap_err(),
            "404 Not Found: Not Found"
        );
    }

    #[test]
    fn test_contents_response_not_json() {
        assert!(contents_from_response(StatusCode::OK, "<html>").is_err());
    }

    #[test]
    fn test_decode_plain_and_unknown_encodings() {
        assert_eq!(decode_contents("bug: x", None).unwrap(), "bug: x");
        assert!(decode_contents("bug: x", Some("gzip")).is_err());
        assert!(decode_contents("!!!", Some("base64")).is_err());
    }
}
