//! Data exchanged with the GitHub API seam.

use serde::Serialize;

/// A repository the run may scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Default branch name (e.g., "main").
    pub default_branch: String,

    /// Whether the authenticated user has admin permission.
    pub admin: bool,

    /// Archived repositories are read-only.
    pub archived: bool,
}

impl RepositoryRef {
    /// Builds a reference with `full_name` derived from owner and name.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        default_branch: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        let name = name.into();
        Self {
            full_name: format!("{owner}/{name}"),
            owner,
            name,
            default_branch: default_branch.into(),
            admin: false,
            archived: false,
        }
    }

    /// Sets the admin permission flag.
    #[must_use]
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Sets the archived flag.
    #[must_use]
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }
}

/// Kind of an entry returned by the contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

impl EntryKind {
    /// Parses the `type` field of a contents response.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "file" => Some(Self::File),
            "dir" => Some(Self::Dir),
            "symlink" => Some(Self::Symlink),
            "submodule" => Some(Self::Submodule),
            _ => None,
        }
    }
}

/// One child of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    /// Path relative to the repository root.
    pub path: String,

    /// Entry kind.
    pub kind: EntryKind,
}

/// A single file as stored on GitHub, still in its transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Path relative to the repository root.
    pub path: String,

    /// Blob SHA, required as the precondition for updates.
    pub sha: String,

    /// Transport encoding reported by GitHub (normally "base64").
    pub encoding: Option<String>,

    /// Raw payload as returned by the API.
    pub payload: String,
}

/// A content update request for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    /// Path relative to the repository root.
    pub path: String,

    /// Commit message.
    pub message: String,

    /// New file content as plain text.
    pub content: String,

    /// SHA of the blob being replaced.
    pub sha: String,

    /// Branch that receives the commit.
    pub branch: String,
}

/// A pull request to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    /// PR title.
    pub title: String,

    /// PR body.
    pub body: String,

    /// Branch holding the changes.
    pub head: String,

    /// Branch the PR targets.
    pub base: String,
}

/// A pull request that GitHub accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRef {
    /// GitHub PR number.
    pub number: u64,

    /// GitHub PR URL.
    pub url: String,
}
