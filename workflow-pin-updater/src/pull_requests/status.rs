//! Pull request status types.

use serde::Serialize;

/// Status of a PR creation operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrStatus {
    /// PR successfully created.
    Created {
        /// GitHub PR number.
        number: u64,
        /// GitHub PR URL.
        url: String,
    },

    /// PR creation failed after the branch was created.
    Failed {
        /// Error message.
        error: String,
    },
}

impl PrStatus {
    /// Returns the status as a string for logs and templates.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Failed { .. } => "failed",
        }
    }

    /// Returns the PR URL if created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Created { url, .. } => Some(url),
            Self::Failed { .. } => None,
        }
    }
}
