//! Workflow file discovery.

use super::DiscoveryError;
use crate::config::UpdateConfig;
use crate::github::{ContentEntry, EntryKind, GitHubApi, RepositoryRef};
use tracing::debug;

/// Lists the workflow files under `config.workflow_path` at `reference`.
///
/// Only files with a configured extension are returned, sorted by path.
/// Subdirectories are followed when `config.recursive` is set. A missing
/// root path yields an empty list.
///
/// # Errors
///
/// Returns [`DiscoveryError`] for any listing failure other than 404.
pub async fn discover_workflow_files<C>(
    client: &C,
    repository: &RepositoryRef,
    reference: &str,
    config: &UpdateConfig,
) -> Result<Vec<ContentEntry>, DiscoveryError>
where
    C: GitHubApi + ?Sized,
{
    let root = config.workflow_path.trim_end_matches('/');
    let mut files = Vec::new();
    let mut directories = vec![root.to_string()];

    while let Some(directory) = directories.pop() {
        let entries = match client.list_directory(repository, &directory, reference).await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => {
                debug!(
                    repo = %repository.full_name,
                    path = %directory,
                    "Path not found"
                );
                continue;
            }
            Err(e) => {
                return Err(DiscoveryError::ListFailed {
                    path: directory,
                    source: e,
                })
            }
        };

        for entry in entries {
            match entry.kind {
                EntryKind::File if config.matches_extension(&entry.path) => files.push(entry),
                EntryKind::File => debug!(path = %entry.path, "Skipping non-workflow file"),
                EntryKind::Dir if config.recursive => directories.push(entry.path),
                EntryKind::Dir | EntryKind::Symlink | EntryKind::Submodule => {
                    debug!(path = %entry.path, kind = ?entry.kind, "Skipping entry");
                }
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
