//! Orchestrates a pin update run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::{FileError, RunnerError};

use crate::commits::commit_changes;
use crate::config::{UpdateConfig, WriteMode};
use crate::discovery::{discover_repositories, discover_workflow_files};
use crate::github::{GitHubApi, OctocrabClient, RepositoryRef};
use crate::pull_requests::open_pull_request;
use crate::rate_limit::guard_core_rate_limit;
use crate::substitution::{prepare_change, PendingChange, ReplacementRule};
use crate::summary::{ProcessingResult, RepositoryOutcome, RunSummary};
use crate::templates::TemplateRenderer;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Runs the replacement across every repository of the configured owner.
///
/// Repositories and files are processed one at a time. A failing repository
/// or file is logged and recorded in the summary; it never aborts the run.
pub struct Runner<C = OctocrabClient> {
    config: UpdateConfig,
    client: C,
    rule: ReplacementRule,
    renderer: TemplateRenderer,
}

impl Runner<OctocrabClient> {
    /// Builds a runner talking to GitHub through octocrab.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid, a template
    /// does not compile or the client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        config.update().validate()?;
        let api_url = config.update().api_url()?;
        let client = OctocrabClient::new(config.token(), api_url.as_ref())?;
        Self::with_client(config.into_update(), client)
    }
}

impl<C: GitHubApi> Runner<C> {
    /// Builds a runner around an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or a template
    /// does not compile.
    pub fn with_client(config: UpdateConfig, client: C) -> Result<Self, RunnerError> {
        config.validate()?;
        let renderer = TemplateRenderer::new(&config.templates)?;
        Ok(Self {
            rule: config.rule(),
            config,
            client,
            renderer,
        })
    }

    /// Executes the full run.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::new(self.config.dry_run);
        info!(
            owner = %self.config.owner,
            search = %self.rule.search(),
            replace = %self.rule.replace(),
            mode = ?self.config.mode,
            dry_run = self.config.dry_run,
            "Starting run"
        );

        let repositories = discover_repositories(&self.client, &self.config.owner).await;
        summary.repositories_discovered = repositories.len();

        if repositories.is_empty() {
            warn!("No repositories found");
            return summary;
        }

        let total = repositories.len();
        for (index, repository) in repositories.iter().enumerate() {
            info!(
                repo = %repository.full_name,
                progress = %format_args!("{}/{}", index + 1, total),
                "Processing repository"
            );
            let result = self.process_repository(repository).await;
            summary.record_result(&result);
        }

        summary
    }

    async fn process_repository(&self, repository: &RepositoryRef) -> ProcessingResult {
        let span = info_span!("repository", repo = %repository.full_name);

        async {
            if repository.archived {
                info!("Skipping archived repository");
                return skipped(repository, "archived");
            }
            if !self.config.includes_repository(&repository.name) {
                debug!("Repository not in allow-list");
                return skipped(repository, "not in repository list");
            }

            guard_core_rate_limit(&self.client, self.config.rate_limit_guard).await;

            let branch = self
                .config
                .branch
                .as_deref()
                .unwrap_or(&repository.default_branch);

            let files =
                match discover_workflow_files(&self.client, repository, branch, &self.config).await
                {
                    Ok(files) => files,
                    Err(e) => {
                        error!(error = %e, "Failed to list workflow files, skipping repository");
                        return ProcessingResult::new(
                            &repository.full_name,
                            RepositoryOutcome::Failed {
                                error: e.to_string(),
                            },
                        );
                    }
                };

            if files.is_empty() {
                info!(path = %self.config.workflow_path, "No workflow files");
                return ProcessingResult::new(
                    &repository.full_name,
                    RepositoryOutcome::NoWorkflowFiles,
                );
            }
            debug!(count = files.len(), "Found workflow files");

            let mut result = ProcessingResult::new(&repository.full_name, RepositoryOutcome::NoMatch);
            let mut changes = Vec::new();
            for entry in &files {
                result.files_scanned += 1;
                match self.scan_file(repository, &entry.path, branch).await {
                    Ok(Some(change)) => {
                        info!(
                            path = %change.path,
                            occurrences = change.occurrences,
                            "Found match"
                        );
                        changes.push(change);
                    }
                    Ok(None) => debug!(path = %entry.path, "No match"),
                    Err(e) => {
                        error!(path = %entry.path, error = %e, "Skipping file");
                        result.files_failed += 1;
                    }
                }
            }
            result.files_matched = changes.len();

            if changes.is_empty() {
                info!("No matches found");
                return result;
            }

            if self.config.dry_run {
                for change in &changes {
                    info!(
                        path = %change.path,
                        occurrences = change.occurrences,
                        branch,
                        "[DRY RUN] Would update file"
                    );
                }
                result.outcome = RepositoryOutcome::Planned;
                return result;
            }

            self.write_back(repository, branch, &changes, &mut result)
                .await;
            result
        }
        .instrument(span)
        .await
    }

    /// Fetches one file and applies the rule to it.
    async fn scan_file(
        &self,
        repository: &RepositoryRef,
        path: &str,
        branch: &str,
    ) -> Result<Option<PendingChange>, FileError> {
        let file = self.client.get_file(repository, path, branch).await?;
        Ok(prepare_change(&file, &self.rule)?)
    }

    async fn write_back(
        &self,
        repository: &RepositoryRef,
        branch: &str,
        changes: &[PendingChange],
        result: &mut ProcessingResult,
    ) {
        match self.config.mode {
            WriteMode::Direct => {
                let report = commit_changes(
                    &self.client,
                    repository,
                    branch,
                    changes,
                    &self.rule,
                    &self.renderer,
                    self.config.rate_limit_guard,
                )
                .await;

                result.files_updated = report.committed;
                result.files_failed += report.failed;
                result.outcome = if report.committed > 0 {
                    RepositoryOutcome::Committed
                } else {
                    RepositoryOutcome::WriteFailed {
                        error: format!("all {} file updates failed", report.failed),
                    }
                };
            }
            WriteMode::PullRequest => {
                match open_pull_request(
                    &self.client,
                    repository,
                    branch,
                    changes,
                    &self.rule,
                    &self.renderer,
                    self.config.rate_limit_guard,
                )
                .await
                {
                    Ok(pr) => {
                        debug!(
                            branch = %pr.branch_name,
                            status = pr.status.as_str(),
                            "Pull request finished"
                        );
                        result.files_updated = pr.files_committed;
                        result.files_failed += pr.files_failed;
                        result.outcome = RepositoryOutcome::PullRequest(pr);
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to prepare PR");
                        result.outcome = RepositoryOutcome::WriteFailed {
                            error: e.to_string(),
                        };
                    }
                }
            }
        }
    }
}

fn skipped(repository: &RepositoryRef, reason: &str) -> ProcessingResult {
    ProcessingResult::new(
        &repository.full_name,
        RepositoryOutcome::Skipped {
            reason: reason.to_string(),
        },
    )
}
