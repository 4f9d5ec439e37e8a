//! Processing result types.

use crate::pull_requests::{PrStatus, UpdatePullRequest};

/// What happened to a repository as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    /// The workflow path is missing or holds no workflow files.
    NoWorkflowFiles,

    /// Workflow files exist but none contains the search literal.
    NoMatch,

    /// Dry run: matches were found and would have been written.
    Planned,

    /// Direct mode: at least one file was committed.
    Committed,

    /// Pull-request mode: a branch was created and a PR attempted.
    PullRequest(UpdatePullRequest),

    /// Matches were found but nothing could be written.
    WriteFailed {
        /// Error message.
        error: String,
    },

    /// The repository was not scanned.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Scanning the repository failed.
    Failed {
        /// Error message.
        error: String,
    },
}

/// Result of processing a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    /// Repository full name.
    pub repository: String,

    /// Workflow files read.
    pub files_scanned: usize,

    /// Files that contained the search literal.
    pub files_matched: usize,

    /// Files written (directly or onto the update branch).
    pub files_updated: usize,

    /// Files that failed to read, decode or write.
    pub files_failed: usize,

    /// Overall outcome.
    pub outcome: RepositoryOutcome,
}

impl ProcessingResult {
    /// Creates a result with zeroed file counters.
    pub fn new(repository: impl Into<String>, outcome: RepositoryOutcome) -> Self {
        Self {
            repository: repository.into(),
            files_scanned: 0,
            files_matched: 0,
            files_updated: 0,
            files_failed: 0,
            outcome,
        }
    }

    /// Returns true if the repository received at least one change on GitHub.
    #[must_use]
    pub fn is_updated(&self) -> bool {
        match &self.outcome {
            RepositoryOutcome::Committed => true,
            RepositoryOutcome::PullRequest(pr) => matches!(pr.status, PrStatus::Created { .. }),
            _ => false,
        }
    }
}
