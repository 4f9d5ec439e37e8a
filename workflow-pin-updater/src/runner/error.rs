//! Runner error types.

use crate::github::ApiError;
use crate::substitution::ChangeError;

/// Errors that prevent a run from starting.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// A configured template does not compile.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),
}

/// Errors that can occur while reading a single workflow file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Fetching the file failed.
    #[error("Failed to fetch file: {0}")]
    Fetch(#[from] ApiError),

    /// The payload could not be decoded or the replacement is unsafe to write.
    #[error("Failed to prepare change: {0}")]
    Prepare(#[from] ChangeError),
}
