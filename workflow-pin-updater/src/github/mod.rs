//! GitHub API seam.
//!
//! Everything the run needs from GitHub goes through the [`GitHubApi`] trait.
//! [`OctocrabClient`] is the production implementation; tests provide an
//! in-memory one.

mod client;
mod error;
mod types;

pub use client::OctocrabClient;
pub use error::ApiError;
pub use types::{
    ContentEntry, EntryKind, FileContent, FileUpdate, PullRequestDraft, PullRequestRef,
    RepositoryRef,
};

use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;

/// Operations the updater performs against GitHub.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Lists every repository of an organization.
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<RepositoryRef>, ApiError>;

    /// Lists every repository visible to the authenticated user.
    async fn list_user_repositories(&self) -> Result<Vec<RepositoryRef>, ApiError>;

    /// Lists a path at `reference`.
    ///
    /// For a directory this returns its immediate children; for a file it
    /// returns the file itself as the only entry.
    async fn list_directory(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: &str,
    ) -> Result<Vec<ContentEntry>, ApiError>;

    /// Fetches a single file at `reference`.
    async fn get_file(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: &str,
    ) -> Result<FileContent, ApiError>;

    /// Writes a file, using `update.sha` as the precondition.
    async fn update_file(
        &self,
        repository: &RepositoryRef,
        update: &FileUpdate,
    ) -> Result<(), ApiError>;

    /// Returns the commit SHA a branch currently points at.
    async fn branch_head(
        &self,
        repository: &RepositoryRef,
        branch: &str,
    ) -> Result<String, ApiError>;

    /// Creates `branch` pointing at `sha`.
    async fn create_branch(
        &self,
        repository: &RepositoryRef,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError>;

    /// Opens a pull request.
    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        draft: &PullRequestDraft,
    ) -> Result<PullRequestRef, ApiError>;

    /// Reads the core API quota.
    async fn core_rate_limit(&self) -> Result<RateLimitInfo, ApiError>;
}
