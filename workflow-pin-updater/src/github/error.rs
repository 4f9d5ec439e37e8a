//! GitHub API error types.

use thiserror::Error;

/// Errors returned by a [`GitHubApi`](super::GitHubApi) implementation.
///
/// Octocrab errors are classified by HTTP status so callers can tell
/// "nothing there" apart from real failures without inspecting messages.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The resource does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication or permission failure (HTTP 401/403).
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The content SHA precondition no longer matches (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status returned by GitHub.
    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The request never produced a GitHub response (network, TLS, JSON).
    #[error("GitHub transport error: {0}")]
    Transport(String),

    /// GitHub answered, but not with the shape we asked for.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Returns true for 404-class errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Maps an HTTP status and message onto the matching variant.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => Self::NotFound(message),
            401 | 403 => Self::Forbidden(message),
            409 => Self::Conflict(message),
            _ => Self::Status { status, message },
        }
    }
}

impl From<octocrab::Error> for ApiError {
    fn from(error: octocrab::Error) -> Self {
        match &error {
            octocrab::Error::GitHub { source, .. } => {
                Self::from_status(source.status_code.as_u16(), source.message.clone())
            }
            _ => Self::Transport(error.to_string()),
        }
    }
}
