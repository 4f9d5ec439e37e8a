//! Pull-request write-back.
//!
//! Stages the pending changes of one repository on a fresh branch cut from
//! the current head of the base branch, then opens a pull request against
//! the base branch. The base branch itself is never written.

mod error;
mod status;
mod update_pr;

pub use error::PrError;
pub use status::PrStatus;
pub use update_pr::UpdatePullRequest;

use crate::commits::commit_change;
use crate::github::{GitHubApi, PullRequestDraft, RepositoryRef};
use crate::rate_limit::guard_core_rate_limit;
use crate::substitution::{PendingChange, ReplacementRule};
use crate::templates::{branch_timestamp, generate_branch_suffix, TemplateRenderer};
use chrono::Utc;
use tracing::{debug, error, info, info_span, Instrument};

/// Creates an update branch, commits `changes` onto it and opens a PR.
///
/// This function:
/// 1. Reads the head commit of `base_branch`
/// 2. Creates a uniquely named branch at that commit
/// 3. Commits every pending change onto the new branch
/// 4. Opens a PR from the new branch into `base_branch`
///
/// Once the branch exists, failures are reported through
/// [`PrStatus::Failed`] so the caller still sees how many files landed.
///
/// # Errors
///
/// Returns [`PrError`] if the branch cannot be prepared.
pub async fn open_pull_request<C>(
    client: &C,
    repository: &RepositoryRef,
    base_branch: &str,
    changes: &[PendingChange],
    rule: &ReplacementRule,
    renderer: &TemplateRenderer,
    rate_limit_guard: bool,
) -> Result<UpdatePullRequest, PrError>
where
    C: GitHubApi + ?Sized,
{
    let span = info_span!(
        "create_pr",
        repo = %repository.full_name,
        base = %base_branch
    );

    async {
        info!("Creating update PR");

        let head_sha = client
            .branch_head(repository, base_branch)
            .await
            .map_err(|source| PrError::BaseBranch {
                branch: base_branch.to_string(),
                source,
            })?;

        let branch_name = renderer.render_branch_name(
            rule,
            repository,
            base_branch,
            &branch_timestamp(Utc::now()),
            &generate_branch_suffix(),
        )?;

        guard_core_rate_limit(client, rate_limit_guard).await;
        client
            .create_branch(repository, &branch_name, &head_sha)
            .await
            .map_err(|source| PrError::CreateBranch {
                branch: branch_name.clone(),
                source,
            })?;
        debug!(branch = %branch_name, sha = %head_sha, "Created branch");

        let mut committed = Vec::with_capacity(changes.len());
        for change in changes {
            match commit_change(
                client,
                repository,
                &branch_name,
                change,
                rule,
                renderer,
                rate_limit_guard,
            )
            .await
            {
                Ok(()) => {
                    debug!(path = %change.path, "Committed file to branch");
                    committed.push(change.clone());
                }
                Err(e) => {
                    error!(path = %change.path, error = %e, "Failed to commit file to branch");
                }
            }
        }

        let mut pr = UpdatePullRequest {
            repository: repository.full_name.clone(),
            branch_name: branch_name.clone(),
            base_branch: base_branch.to_string(),
            title: String::new(),
            files_committed: committed.len(),
            files_failed: changes.len() - committed.len(),
            status: PrStatus::Failed {
                error: "no file could be committed to the update branch".to_string(),
            },
        };

        if committed.is_empty() {
            error!(branch = %branch_name, "Nothing committed, not opening PR");
            return Ok(pr);
        }

        let draft = match render_draft(
            renderer,
            rule,
            repository,
            &branch_name,
            base_branch,
            &committed,
        ) {
            Ok(draft) => draft,
            Err(e) => {
                error!(error = %e, "Failed to render PR text");
                pr.status = PrStatus::Failed {
                    error: e.to_string(),
                };
                return Ok(pr);
            }
        };
        pr.title = draft.title.clone();

        guard_core_rate_limit(client, rate_limit_guard).await;
        pr.status = match client.create_pull_request(repository, &draft).await {
            Ok(created) => {
                info!(pr_number = created.number, url = %created.url, "PR created successfully");
                PrStatus::Created {
                    number: created.number,
                    url: created.url,
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to open PR");
                PrStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        Ok(pr)
    }
    .instrument(span)
    .await
}

fn render_draft(
    renderer: &TemplateRenderer,
    rule: &ReplacementRule,
    repository: &RepositoryRef,
    branch_name: &str,
    base_branch: &str,
    committed: &[PendingChange],
) -> Result<PullRequestDraft, crate::templates::TemplateError> {
    Ok(PullRequestDraft {
        title: renderer.render_pr_title(rule, repository, branch_name, base_branch)?,
        body: renderer.render_pr_body(rule, repository, branch_name, base_branch, committed)?,
        head: branch_name.to_string(),
        base: base_branch.to_string(),
    })
}
