//! Direct-commit write-back.
//!
//! Each pending change becomes one content-update call against the target
//! branch, carrying the SHA the change was derived from. A stale SHA fails
//! that file only; nothing is retried.

use crate::github::{ApiError, FileUpdate, GitHubApi, RepositoryRef};
use crate::rate_limit::guard_core_rate_limit;
use crate::substitution::{PendingChange, ReplacementRule};
use crate::templates::{TemplateError, TemplateRenderer};
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur while writing a single file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Commit message rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The update call failed.
    #[error("Failed to update file: {0}")]
    Api(#[from] ApiError),
}

/// Counts of a batch of file writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Files written successfully.
    pub committed: usize,

    /// Files whose write failed.
    pub failed: usize,
}

/// Writes every pending change straight onto `branch`.
pub async fn commit_changes<C>(
    client: &C,
    repository: &RepositoryRef,
    branch: &str,
    changes: &[PendingChange],
    rule: &ReplacementRule,
    renderer: &TemplateRenderer,
    rate_limit_guard: bool,
) -> CommitReport
where
    C: GitHubApi + ?Sized,
{
    let mut report = CommitReport::default();

    for change in changes {
        match commit_change(
            client,
            repository,
            branch,
            change,
            rule,
            renderer,
            rate_limit_guard,
        )
        .await
        {
            Ok(()) => {
                info!(
                    repo = %repository.full_name,
                    path = %change.path,
                    branch,
                    occurrences = change.occurrences,
                    "Updated file"
                );
                report.committed += 1;
            }
            Err(e) => {
                error!(
                    repo = %repository.full_name,
                    path = %change.path,
                    error = %e,
                    "Failed to update file"
                );
                report.failed += 1;
            }
        }
    }

    report
}

/// Writes one pending change onto `branch`.
///
/// # Errors
///
/// Returns [`WriteError`] if the message cannot be rendered or the update is rejected.
pub async fn commit_change<C>(
    client: &C,
    repository: &RepositoryRef,
    branch: &str,
    change: &PendingChange,
    rule: &ReplacementRule,
    renderer: &TemplateRenderer,
    rate_limit_guard: bool,
) -> Result<(), WriteError>
where
    C: GitHubApi + ?Sized,
{
    let message = renderer.render_commit_message(rule, repository, branch, &change.path)?;
    guard_core_rate_limit(client, rate_limit_guard).await;

    client
        .update_file(
            repository,
            &FileUpdate {
                path: change.path.clone(),
                message,
                content: change.content.clone(),
                sha: change.sha.clone(),
                branch: branch.to_string(),
            },
        )
        .await?;
    Ok(())
}
