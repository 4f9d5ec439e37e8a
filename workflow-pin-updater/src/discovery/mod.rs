//! Repository and workflow file discovery.
//!
//! Repositories come from the organization listing, or, when that fails,
//! from the authenticated user's own admin repositories. Workflow files are
//! found by listing a fixed path in each repository.

mod error;
mod files;

pub use error::DiscoveryError;
pub use files::discover_workflow_files;

use crate::github::{GitHubApi, RepositoryRef};
use std::collections::HashSet;
use tracing::{error, info, info_span, warn, Instrument};

/// Discovers the repositories owned by `owner`.
///
/// Never fails: a failing source is logged and contributes nothing.
///
/// # Returns
///
/// Repositories deduplicated by full name, in listing order.
pub async fn discover_repositories<C>(client: &C, owner: &str) -> Vec<RepositoryRef>
where
    C: GitHubApi + ?Sized,
{
    let span = info_span!("discover", owner = %owner);

    async {
        info!("Starting repository discovery");

        let listed = match client.list_org_repositories(owner).await {
            Ok(repositories) => {
                info!(count = repositories.len(), "Listed organization repositories");
                repositories
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Organization listing failed, falling back to user repositories"
                );
                match client.list_user_repositories().await {
                    Ok(repositories) => filter_user_repositories(repositories, owner),
                    Err(e) => {
                        error!(error = %e, "Failed to list user repositories");
                        Vec::new()
                    }
                }
            }
        };

        let repositories = deduplicate_repositories(listed);
        info!(count = repositories.len(), "Discovery complete");
        repositories
    }
    .instrument(span)
    .await
}

/// Keeps the user repositories owned by `owner` that the user administers.
fn filter_user_repositories(repositories: Vec<RepositoryRef>, owner: &str) -> Vec<RepositoryRef> {
    let total = repositories.len();
    let kept: Vec<_> = repositories
        .into_iter()
        .filter(|repo| repo.admin && repo.owner.eq_ignore_ascii_case(owner))
        .collect();
    info!(
        total,
        kept = kept.len(),
        "Filtered user repositories by owner and admin permission"
    );
    kept
}

/// Deduplicates repositories by full name, keeping the first occurrence.
fn deduplicate_repositories(repositories: Vec<RepositoryRef>) -> Vec<RepositoryRef> {
    let mut seen = HashSet::new();
    repositories
        .into_iter()
        .filter(|repo| seen.insert(repo.full_name.to_ascii_lowercase()))
        .collect()
}
