//! Run configuration deserialization and validation.

use crate::config::ConfigError;
use crate::substitution::ReplacementRule;
use bstr::ByteSlice;
use serde::{Deserialize, Serialize};
use url::Url;

/// How matched files are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Commit straight onto the target branch.
    #[default]
    Direct,

    /// Commit onto a fresh branch and open a pull request.
    PullRequest,
}

/// Handlebars formats for everything the run writes to GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TemplateFormats {
    /// Commit message, rendered once per file.
    pub commit_message: String,

    /// Pull request title.
    pub pr_title: String,

    /// Pull request body.
    pub pr_body: String,

    /// Name of the branch created in pull-request mode.
    pub branch_name: String,
}

impl Default for TemplateFormats {
    fn default() -> Self {
        Self {
            commit_message: default_commit_message_format(),
            pr_title: default_pr_title_format(),
            pr_body: default_pr_body_template(),
            branch_name: default_branch_name_format(),
        }
    }
}

pub fn default_commit_message_format() -> String {
    "Update {{search}} to {{replace}} in {{path}}".to_string()
}

pub fn default_pr_title_format() -> String {
    "Update {{search}} to {{replace}}".to_string()
}

pub fn default_branch_name_format() -> String {
    "workflow-pin-update/{{timestamp}}-{{suffix}}".to_string()
}

pub fn default_pr_body_template() -> String {
    "\
Replaces `{{search}}` with `{{replace}}` in the workflow files of `{{full_name}}`.

Changed files:
{{#each files}}
- `{{this.path}}` ({{this.occurrences}} occurrence(s))
{{/each}}
"
    .to_string()
}

pub(crate) fn default_workflow_path() -> String {
    ".github/workflows/".to_string()
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec!["yml".to_string(), "yaml".to_string()]
}

/// Settings for a single run, read from a TOML file and/or CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct UpdateConfig {
    /// Organization or user whose repositories are scanned.
    pub owner: String,

    /// Literal to look for.
    pub search: String,

    /// Literal written in its place.
    pub replace: String,

    /// Directory (or single file) scanned in every repository.
    pub workflow_path: String,

    /// Write-back strategy.
    pub mode: WriteMode,

    /// Target branch; the repository default branch when unset.
    pub branch: Option<String>,

    /// Whether to descend into subdirectories of `workflow_path`.
    pub recursive: bool,

    /// File extensions considered workflow files. Empty accepts every file.
    pub extensions: Vec<String>,

    /// Restricts the run to these repository names. Empty means all.
    pub repositories: Vec<String>,

    /// Read and report, but never write.
    pub dry_run: bool,

    /// Whether to check the core quota before heavy steps.
    pub rate_limit_guard: bool,

    /// GitHub API base URL (GitHub Enterprise); api.github.com when unset.
    pub api_url: Option<String>,

    /// Commit, branch and pull request formats.
    pub templates: TemplateFormats,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            search: String::new(),
            replace: String::new(),
            workflow_path: default_workflow_path(),
            mode: WriteMode::default(),
            branch: None,
            recursive: false,
            extensions: default_extensions(),
            repositories: Vec::new(),
            dry_run: false,
            rate_limit_guard: true,
            api_url: None,
            templates: TemplateFormats::default(),
        }
    }
}

impl UpdateConfig {
    /// Creates a configuration with defaults for everything but the essentials.
    pub fn new(
        owner: impl Into<String>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            search: search.into(),
            replace: replace.into(),
            ..Self::default()
        }
    }

    /// Returns the replacement rule for this run.
    #[must_use]
    pub fn rule(&self) -> ReplacementRule {
        ReplacementRule::new(self.search.clone(), self.replace.clone())
    }

    /// Returns the parsed API base URL, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the URL does not parse.
    pub fn api_url(&self) -> Result<Option<Url>, ConfigError> {
        self.api_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| validation("api-url", format!("'{raw}' {e}")))
            })
            .transpose()
    }

    /// Returns true if `name` passes the repository allow-list.
    #[must_use]
    pub fn includes_repository(&self, name: &str) -> bool {
        self.repositories.is_empty()
            || self
                .repositories
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(name))
    }

    /// Returns true if `path` has one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some((_, extension)) = path.rsplit_once('.') else {
            return false;
        };
        self.extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }

    /// Checks the configuration for values that would make the run unsafe.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(validation("owner", "must not be empty"));
        }
        if self.owner.contains('/') {
            return Err(validation("owner", "must be an account name, not owner/repo"));
        }

        if self.search.trim().is_empty() {
            return Err(validation("search", "must not be empty"));
        }
        if self.replace.trim().is_empty() {
            return Err(validation("replace", "must not be empty"));
        }
        if self.search == self.replace {
            return Err(validation("replace", "must differ from search"));
        }
        // A replacement containing the search literal would match again on
        // the next run.
        if self.replace.contains(self.search.as_str()) {
            return Err(validation("replace", "must not contain the search literal"));
        }

        if self.workflow_path.trim_matches('/').trim().is_empty() {
            return Err(validation("workflow-path", "must not be empty"));
        }

        if let Some(branch) = &self.branch {
            if !is_valid_branch_name(branch) {
                return Err(validation(
                    "branch",
                    format!("'{branch}' is not a valid branch name"),
                ));
            }
        }

        self.api_url()?;
        Ok(())
    }
}

/// Returns true if `name` is usable as a git branch name.
#[must_use]
pub fn is_valid_branch_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && gix_validate::reference::name_partial(name.as_bytes().as_bstr()).is_ok()
}

fn validation(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}
