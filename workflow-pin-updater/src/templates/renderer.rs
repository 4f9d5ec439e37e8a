//! Template renderer.

use crate::config::{is_valid_branch_name, TemplateFormats};
use crate::github::RepositoryRef;
use crate::substitution::{PendingChange, ReplacementRule};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::{json, Value};

const COMMIT_MESSAGE: &str = "commit_message";
const PR_TITLE: &str = "pr_title";
const PR_BODY: &str = "pr_body";
const BRANCH_NAME: &str = "branch_name";

handlebars_helper!(str_eq: |a: str, b: str| a == b);

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    // Usage: `{{#if (eq base_branch "main")}}...{{/if}}`
    hbs.register_helper("eq", Box::new(str_eq));
    hbs
}

/// Renders commit messages, pull request text and branch names.
///
/// Formats are compiled once at construction so a broken template fails the
/// run before any repository is touched.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compiles the configured formats.
    ///
    /// # Errors
    ///
    /// Returns [`super::TemplateError::RegistrationError`] for malformed templates.
    pub fn new(formats: &TemplateFormats) -> Result<Self, super::TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(COMMIT_MESSAGE, &formats.commit_message)?;
        handlebars.register_template_string(PR_TITLE, &formats.pr_title)?;
        handlebars.register_template_string(PR_BODY, &formats.pr_body)?;
        handlebars.register_template_string(BRANCH_NAME, &formats.branch_name)?;
        Ok(Self { handlebars })
    }

    /// Renders the commit message for one file.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_commit_message(
        &self,
        rule: &ReplacementRule,
        repository: &RepositoryRef,
        branch: &str,
        path: &str,
    ) -> Result<String, super::TemplateError> {
        let mut data = base_data(rule, repository);
        data["branch"] = json!(branch);
        data["path"] = json!(path);
        self.render(COMMIT_MESSAGE, &data)
    }

    /// Renders the pull request title.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_pr_title(
        &self,
        rule: &ReplacementRule,
        repository: &RepositoryRef,
        branch: &str,
        base_branch: &str,
    ) -> Result<String, super::TemplateError> {
        let mut data = base_data(rule, repository);
        data["branch"] = json!(branch);
        data["base_branch"] = json!(base_branch);
        self.render(PR_TITLE, &data)
    }

    /// Renders the pull request body listing the changed files.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_pr_body(
        &self,
        rule: &ReplacementRule,
        repository: &RepositoryRef,
        branch: &str,
        base_branch: &str,
        files: &[PendingChange],
    ) -> Result<String, super::TemplateError> {
        let mut data = base_data(rule, repository);
        data["branch"] = json!(branch);
        data["base_branch"] = json!(base_branch);
        data["files"] = json!(files);
        self.render(PR_BODY, &data)
    }

    /// Renders and validates the branch name used in pull-request mode.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the result is not a valid ref.
    pub fn render_branch_name(
        &self,
        rule: &ReplacementRule,
        repository: &RepositoryRef,
        base_branch: &str,
        timestamp: &str,
        suffix: &str,
    ) -> Result<String, super::TemplateError> {
        let mut data = base_data(rule, repository);
        data["base_branch"] = json!(base_branch);
        data["timestamp"] = json!(timestamp);
        data["suffix"] = json!(suffix);

        let name = self.render(BRANCH_NAME, &data)?.trim().to_string();
        if !is_valid_branch_name(&name) {
            return Err(super::TemplateError::InvalidBranchName(name));
        }
        Ok(name)
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render(name, data)?)
    }
}

fn base_data(rule: &ReplacementRule, repository: &RepositoryRef) -> Value {
    json!({
        "search": rule.search(),
        "replace": rule.replace(),
        "owner": repository.owner,
        "repository": repository.name,
        "full_name": repository.full_name,
    })
}
