//! Octocrab-backed implementation of [`GitHubApi`].

use super::{
    ApiError, ContentEntry, EntryKind, FileContent, FileUpdate, GitHubApi, PullRequestDraft,
    PullRequestRef, RepositoryRef,
};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use octocrab::models::repos::{Content, Object};
use octocrab::models::Repository;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;
use tracing::debug;
use url::Url;

/// Results per page for repository listings.
const RESULTS_PER_PAGE: u8 = 100;

/// GitHub client used for a real run.
///
/// Built once from the access token and passed by reference to everything
/// that talks to GitHub.
#[derive(Clone)]
pub struct OctocrabClient {
    octocrab: Octocrab,
}

impl OctocrabClient {
    /// Builds an authenticated client.
    ///
    /// `api_url` points the client at a GitHub Enterprise instance; `None`
    /// uses api.github.com.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is rejected or the client cannot be built.
    pub fn new(token: &str, api_url: Option<&Url>) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = api_url {
            builder = builder.base_uri(url.as_str())?;
        }
        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

#[async_trait]
impl GitHubApi for OctocrabClient {
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<RepositoryRef>, ApiError> {
        debug!(org, "Listing organization repositories");
        let first = self
            .octocrab
            .orgs(org)
            .list_repos()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let repositories = self.octocrab.all_pages(first).await?;
        Ok(repositories.into_iter().filter_map(to_repository_ref).collect())
    }

    async fn list_user_repositories(&self) -> Result<Vec<RepositoryRef>, ApiError> {
        debug!("Listing authenticated user repositories");
        let first = self
            .octocrab
            .current()
            .list_repos_for_authenticated_user()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let repositories = self.octocrab.all_pages(first).await?;
        Ok(repositories.into_iter().filter_map(to_repository_ref).collect())
    }

    async fn list_directory(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: &str,
    ) -> Result<Vec<ContentEntry>, ApiError> {
        let items = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await?;

        Ok(items
            .items
            .into_iter()
            .filter_map(|item| {
                let kind = EntryKind::parse(&item.r#type)?;
                Some(ContentEntry {
                    path: item.path,
                    kind,
                })
            })
            .collect())
    }

    async fn get_file(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: &str,
    ) -> Result<FileContent, ApiError> {
        let mut items = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await?;

        if items.items.len() != 1 {
            return Err(ApiError::UnexpectedResponse(format!(
                "{path} is a directory, not a file"
            )));
        }
        let item = items.items.remove(0);
        to_file_content(item)
    }

    async fn update_file(
        &self,
        repository: &RepositoryRef,
        update: &FileUpdate,
    ) -> Result<(), ApiError> {
        self.octocrab
            .repos(&repository.owner, &repository.name)
            .update_file(&update.path, &update.message, &update.content, &update.sha)
            .branch(&update.branch)
            .send()
            .await?;
        Ok(())
    }

    async fn branch_head(
        &self,
        repository: &RepositoryRef,
        branch: &str,
    ) -> Result<String, ApiError> {
        let reference = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get_ref(&Reference::Branch(branch.to_string()))
            .await?;

        match reference.object {
            Object::Commit { sha, .. } => Ok(sha),
            _ => Err(ApiError::UnexpectedResponse(format!(
                "{branch} does not point at a commit"
            ))),
        }
    }

    async fn create_branch(
        &self,
        repository: &RepositoryRef,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError> {
        self.octocrab
            .repos(&repository.owner, &repository.name)
            .create_ref(&Reference::Branch(branch.to_string()), sha)
            .await?;
        Ok(())
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        draft: &PullRequestDraft,
    ) -> Result<PullRequestRef, ApiError> {
        let pr = self
            .octocrab
            .pulls(&repository.owner, &repository.name)
            .create(&draft.title, &draft.head, &draft.base)
            .body(&draft.body)
            .send()
            .await?;

        let url = pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| {
                format!(
                    "https://github.com/{}/pull/{}",
                    repository.full_name, pr.number
                )
            });

        Ok(PullRequestRef {
            number: pr.number,
            url,
        })
    }

    async fn core_rate_limit(&self) -> Result<RateLimitInfo, ApiError> {
        let rate_limit = self.octocrab.ratelimit().get().await?;
        let core = &rate_limit.resources.core;

        Ok(RateLimitInfo {
            remaining: core.remaining as u32,
            reset: core.reset,
            limit: core.limit as u32,
        })
    }
}

/// Converts an octocrab repository, dropping entries without an owner.
fn to_repository_ref(repository: Repository) -> Option<RepositoryRef> {
    let owner = repository.owner?.login;
    let default_branch = repository
        .default_branch
        .unwrap_or_else(|| "main".to_string());
    let admin = repository.permissions.is_some_and(|p| p.admin);
    let archived = repository.archived.unwrap_or(false);

    Some(
        RepositoryRef::new(owner, repository.name, default_branch)
            .with_admin(admin)
            .with_archived(archived),
    )
}

fn to_file_content(item: Content) -> Result<FileContent, ApiError> {
    if item.r#type != "file" {
        return Err(ApiError::UnexpectedResponse(format!(
            "{} is a {}, not a file",
            item.path, item.r#type
        )));
    }
    let payload = item.content.ok_or_else(|| {
        ApiError::UnexpectedResponse(format!("{} has no inline content", item.path))
    })?;

    Ok(FileContent {
        path: item.path,
        sha: item.sha,
        encoding: item.encoding,
        payload,
    })
}
