//! One classification run: event → configuration → classifier → sink.

use crate::classifier::{ClassificationResult, LabelClassifier};
use crate::compiler::ConfigParser;
use crate::config::LabelerConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::event::EventContextProvider;
use crate::sink::LabelSink;
use crate::source::ConfigSource;
use tracing::info;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Labels were handed to the sink.
    Applied,
    /// No rule matched; the sink was not called.
    NothingToApply,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub issue: u64,
    pub result: ClassificationResult,
    pub diagnostics: Diagnostics,
    pub outcome: RunOutcome,
}

/// The three collaborators of a run.
pub struct Collaborators<'a> {
    pub source: &'a dyn ConfigSource,
    pub events: &'a dyn EventContextProvider,
    pub sink: &'a dyn LabelSink,
}

/// Classify the triggering issue and apply the resulting labels.
///
/// # Errors
/// Fatal errors only: the event has no issue, the configuration cannot be
/// loaded or parsed, or the sink fails. Rule and pattern problems are
/// returned in [`RunReport::diagnostics`].
pub fn run_once(
    collaborators: &Collaborators<'_>,
    config_path: &str,
    config: &LabelerConfig,
) -> Result<RunReport> {
    let issue = collaborators.events.issue_context()?;
    let text = collaborators.source.fetch(config_path)?;
    let rule_set = ConfigParser::new().parse(&text)?;

    let classifier = LabelClassifier::from_rule_set(&rule_set, config);
    let result = classifier.classify(&issue);

    let mut diagnostics = rule_set.diagnostics;
    diagnostics.extend(classifier.diagnostics().clone());

    let outcome = if result.is_empty() {
        info!("No labels matched issue #{}", issue.id());
        RunOutcome::NothingToApply
    } else {
        info!("Adding labels {:?} to issue #{}", result.labels(), issue.id());
        collaborators.sink.apply(issue.id(), result.labels())?;
        RunOutcome::Applied
    };

    Ok(RunReport {
        issue: issue.id(),
        result,
        diagnostics,
        outcome,
    })
}
