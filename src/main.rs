//! `issue-labeler` - label a newly opened issue from a rules file.
//!
//! Designed to run as a GitHub Actions step on `issues: opened`:
//!
//! ```text
//! issue-labeler --configuration-path .github/labeler.yml
//! ```
//!
//! The token, repository and event payload are taken from the standard
//! `GITHUB_*` environment variables when not given on the command line.

use anyhow::{bail, Context, Result};
use clap::Parser;
use issue_labeler::telemetry::init_tracing;
use issue_labeler::{
    run_once, Collaborators, ConfigSource, DryRunSink, FileConfigSource, GitHubApi,
    GitHubContentsSource, GitHubEventFile, GitHubLabelSink, IssueConfig, LabelSink,
    LabelerConfig, LiteralMode, Repository, DEFAULT_API_URL,
};
use std::path::PathBuf;
use tracing::{warn, Level};

#[derive(Parser)]
#[command(name = "issue-labeler")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Apply labels to a new issue based on regex and literal rules", long_about = None)]
struct Cli {
    /// Token used to post labels (and fetch the configuration with --remote-config)
    #[arg(long = "repo-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    repo_token: Option<String>,

    /// Path of the rules file, relative to the workspace or repository root
    #[arg(long, default_value = ".github/labeler.yml")]
    configuration_path: String,

    /// Webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Directory the configuration path is resolved against
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Fetch the configuration through the contents API instead of the filesystem
    #[arg(long)]
    remote_config: bool,

    /// Commit, branch or tag to read the remote configuration from
    #[arg(long = "ref", env = "GITHUB_SHA")]
    git_ref: Option<String>,

    /// How non-regex patterns match: case-sensitive, case-insensitive or disabled
    #[arg(long, default_value_t = LiteralMode::CaseSensitive)]
    literal_mode: LiteralMode,

    /// Match against the issue title as well as the body
    #[arg(long)]
    include_title: bool,

    /// Compute labels but do not post them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn labeler_config(&self) -> LabelerConfig {
        LabelerConfig::new()
            .with_literal_mode(self.literal_mode)
            .with_title(self.include_title)
    }

    fn github_api(&self) -> Result<GitHubApi> {
        let token = self
            .repo_token
            .as_deref()
            .context("a repo token is required (set --repo-token or GITHUB_TOKEN)")?;
        let slug = self
            .repository
            .as_deref()
            .context("a repository is required (set --repository or GITHUB_REPOSITORY)")?;
        let repository = Repository::parse(slug)
            .with_context(|| format!("repository '{slug}' is not of the form owner/name"))?;

        GitHubApi::new(&self.api_url, repository, token).context("failed to build GitHub client")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json, level);

    let config = cli.labeler_config();
    let events = GitHubEventFile::new(
        &cli.event_path,
        IssueConfig {
            include_title: cli.include_title,
        },
    );

    let api = if cli.dry_run && !cli.remote_config {
        None
    } else {
        Some(cli.github_api()?)
    };

    let source: Box<dyn ConfigSource> = match (&api, cli.remote_config) {
        (Some(api), true) => {
            let source = GitHubContentsSource::new(api.clone());
            match &cli.git_ref {
                Some(git_ref) => Box::new(source.at_ref(git_ref)),
                None => Box::new(source),
            }
        }
        (None, true) => bail!("--remote-config needs GitHub access"),
        (_, false) => match &cli.workspace {
            Some(root) => Box::new(FileConfigSource::with_root(root)),
            None => Box::new(FileConfigSource::new()),
        },
    };

    let sink: Box<dyn LabelSink> = match (&api, cli.dry_run) {
        (Some(api), false) => Box::new(GitHubLabelSink::new(api.clone())),
        _ => Box::new(DryRunSink),
    };

    let collaborators = Collaborators {
        source: source.as_ref(),
        events: &events,
        sink: sink.as_ref(),
    };

    let report = run_once(&collaborators, &cli.configuration_path, &config)
        .context("issue labeling failed")?;

    if !report.diagnostics.is_empty() {
        warn!(
            "Completed with {} configuration warnings",
            report.diagnostics.len()
        );
    }

    println!("{}", serde_json::to_string(report.result.labels())?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "issue-labeler",
            "--event-path",
            "/tmp/event.json",
            "--literal-mode",
            "case-insensitive",
            "--include-title",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.configuration_path, ".github/labeler.yml");
        assert!(cli.dry_run);

        let config = cli.labeler_config();
        assert_eq!(config.matching.literal_mode, LiteralMode::CaseInsensitive);
        assert!(config.issue.include_title);
    }
}
