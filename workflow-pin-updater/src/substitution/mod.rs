//! Content substitution.
//!
//! Decodes a fetched workflow file, checks it for the search literal and,
//! when present, produces the rewritten text together with the SHA it was
//! derived from.

mod decode;
mod error;
mod rule;

pub use decode::decode_content;
pub use error::{ChangeError, DecodeError};
pub use rule::{ReplacementRule, Substitution};

use crate::github::FileContent;
use serde::Serialize;

/// A file whose rewritten content is waiting to be written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingChange {
    /// Path relative to the repository root.
    pub path: String,

    /// SHA of the blob the new content was derived from.
    pub sha: String,

    /// Rewritten file content.
    #[serde(skip)]
    pub content: String,

    /// Number of occurrences replaced.
    pub occurrences: usize,
}

/// Decodes `file` and applies `rule`.
///
/// Returns `Ok(None)` when the file does not contain the search literal.
///
/// # Errors
///
/// Returns [`ChangeError`] if the payload cannot be turned into text or the
/// replacement would leave the search literal in the file.
pub fn prepare_change(
    file: &FileContent,
    rule: &ReplacementRule,
) -> Result<Option<PendingChange>, ChangeError> {
    let text = decode_content(file)?;

    match rule.apply(&text) {
        Substitution::Unchanged => Ok(None),
        Substitution::Replaced {
            content,
            occurrences,
        } => Ok(Some(PendingChange {
            path: file.path.clone(),
            sha: file.sha.clone(),
            content,
            occurrences,
        })),
        Substitution::Incomplete { .. } => Err(ChangeError::SearchRemains {
            path: file.path.clone(),
            search: rule.search().to_string(),
        }),
    }
}
