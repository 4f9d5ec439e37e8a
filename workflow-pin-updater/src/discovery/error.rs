//! Workflow discovery error types.

use crate::github::ApiError;
use thiserror::Error;

/// Errors that can occur while listing workflow files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A directory listing failed for a reason other than "not found".
    #[error("Failed to list '{path}': {source}")]
    ListFailed {
        path: String,
        #[source]
        source: ApiError,
    },
}
