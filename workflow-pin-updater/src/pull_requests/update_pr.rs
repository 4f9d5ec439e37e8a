//! Pull request information.

use super::PrStatus;
use serde::Serialize;

/// A pull request opened to apply the replacement in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePullRequest {
    /// Target repository full name.
    pub repository: String,

    /// Branch holding the commits.
    pub branch_name: String,

    /// Branch the PR targets.
    pub base_branch: String,

    /// PR title (empty if never rendered).
    pub title: String,

    /// Files committed onto the branch.
    pub files_committed: usize,

    /// Files whose commit failed.
    pub files_failed: usize,

    /// Creation status.
    pub status: PrStatus,
}
