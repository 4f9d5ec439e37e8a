//! Run summary types.

use super::result::{ProcessingResult, RepositoryOutcome};
use crate::pull_requests::{PrStatus, UpdatePullRequest};

/// Summary of a complete run.
///
/// A repository without a workflow directory counts as scanned and not
/// updated, and additionally under `repositories_without_workflows`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of repositories returned by discovery.
    pub repositories_discovered: usize,

    /// Number of repositories whose workflow path was examined.
    pub repositories_scanned: usize,

    /// Number of repositories with at least one matching file.
    pub repositories_with_matches: usize,

    /// Number of repositories that received a commit or PR.
    pub repositories_updated: usize,

    /// Number of scanned repositories without workflow files.
    pub repositories_without_workflows: usize,

    /// Number of repositories not scanned (archived, filtered out).
    pub repositories_skipped: usize,

    /// Number of repositories where scanning or writing failed.
    pub repositories_failed: usize,

    /// Number of workflow files read.
    pub files_scanned: usize,

    /// Number of files containing the search literal.
    pub files_matched: usize,

    /// Number of files written.
    pub files_updated: usize,

    /// Number of files that failed to read, decode or write.
    pub files_failed: usize,

    /// Pull requests successfully opened, in processing order.
    pub pull_requests: Vec<UpdatePullRequest>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        if let RepositoryOutcome::Skipped { .. } = result.outcome {
            self.repositories_skipped += 1;
            return;
        }

        self.repositories_scanned += 1;
        self.files_scanned += result.files_scanned;
        self.files_matched += result.files_matched;
        self.files_updated += result.files_updated;
        self.files_failed += result.files_failed;

        if result.files_matched > 0 {
            self.repositories_with_matches += 1;
        }
        if result.is_updated() {
            self.repositories_updated += 1;
        }

        match &result.outcome {
            RepositoryOutcome::NoWorkflowFiles => self.repositories_without_workflows += 1,
            RepositoryOutcome::PullRequest(pr) => match pr.status {
                PrStatus::Created { .. } => self.pull_requests.push(pr.clone()),
                PrStatus::Failed { .. } => self.repositories_failed += 1,
            },
            RepositoryOutcome::WriteFailed { .. }
            | RepositoryOutcome::Failed { .. } => self.repositories_failed += 1,
            RepositoryOutcome::NoMatch
            | RepositoryOutcome::Planned
            | RepositoryOutcome::Committed
            | RepositoryOutcome::Skipped { .. } => {}
        }
    }

    /// Number of pull requests successfully opened.
    #[must_use]
    pub fn pull_requests_created(&self) -> usize {
        self.pull_requests.len()
    }

    /// Scanned repositories that received no change.
    #[must_use]
    pub fn repositories_unchanged(&self) -> usize {
        self.repositories_scanned - self.repositories_updated
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.repositories_failed > 0 || self.files_failed > 0
    }
}
