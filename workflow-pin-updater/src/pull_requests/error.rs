//! Pull request error types.

use crate::github::ApiError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that stop a pull request before its branch holds any commit.
#[derive(Debug, Error)]
pub enum PrError {
    /// The head of the base branch could not be read.
    #[error("Failed to read head of '{branch}': {source}")]
    BaseBranch {
        branch: String,
        #[source]
        source: ApiError,
    },

    /// The update branch could not be created.
    #[error("Failed to create branch '{branch}': {source}")]
    CreateBranch {
        branch: String,
        #[source]
        source: ApiError,
    },

    /// Branch name rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
