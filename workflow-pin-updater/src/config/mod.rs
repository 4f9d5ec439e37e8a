//! Configuration loading.
//!
//! A run is described by an [`UpdateConfig`], read from a kebab-case TOML
//! file and/or assembled from CLI flags. The access token never lives in the
//! file; it comes from the command line or `GITHUB_TOKEN`.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    default_branch_name_format, default_commit_message_format, default_pr_body_template,
    default_pr_title_format, is_valid_branch_name, TemplateFormats, UpdateConfig, WriteMode,
};

use std::path::Path;
use tracing::{debug, info};

/// Environment variable holding the GitHub access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Loads a run configuration from a TOML file.
///
/// ```toml
/// owner = "acme"
/// search = "aws-actions/amazon-ecs-deploy-task-definition@v1"
/// replace = "aws-actions/amazon-ecs-deploy-task-definition@v2"
/// mode = "pull-request"
/// recursive = true
///
/// [templates]
/// pr-title = "ci: bump ECS deploy action"
/// ```
///
/// The result is not validated, so CLI flags can still fill in missing values;
/// call [`UpdateConfig::validate`] once everything is merged.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, unreadable or not valid TOML.
pub fn load_config(path: &Path) -> Result<UpdateConfig, ConfigError> {
    info!(path = %path.display(), "Loading configuration");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: UpdateConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(owner = %config.owner, mode = ?config.mode, "Parsed configuration");
    Ok(config)
}

/// Resolves the access token from an explicit value or `GITHUB_TOKEN`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingToken`] if neither source has a non-blank value.
pub fn resolve_token(explicit: Option<String>) -> Result<String, ConfigError> {
    explicit
        .or_else(|| std::env::var(TOKEN_ENV).ok())
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingToken)
}
