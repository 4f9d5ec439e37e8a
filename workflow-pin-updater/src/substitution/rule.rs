//! Literal replacement rule.

use serde::Serialize;

/// Outcome of applying a [`ReplacementRule`] to some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// The search literal does not occur; the text is left as is.
    Unchanged,

    /// Every occurrence was replaced.
    Replaced {
        /// Text with all occurrences replaced.
        content: String,
        /// Number of occurrences replaced.
        occurrences: usize,
    },

    /// Replacing created a new occurrence across the seam between the
    /// replacement and its surrounding text. The result must not be written.
    Incomplete {
        /// Number of occurrences replaced.
        occurrences: usize,
    },
}

/// An immutable `(search, replace)` literal pair fixed at run start.
///
/// Matching is plain substring containment. Nothing is escaped, templated
/// or parsed as YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementRule {
    search: String,
    replace: String,
}

impl ReplacementRule {
    /// Creates a rule. Validation happens in [`crate::config`].
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }

    /// The literal to look for.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The literal written in its place.
    #[must_use]
    pub fn replace(&self) -> &str {
        &self.replace
    }

    /// Counts non-overlapping occurrences of the search literal.
    #[must_use]
    pub fn count_matches(&self, text: &str) -> usize {
        if self.search.is_empty() {
            return 0;
        }
        text.matches(self.search.as_str()).count()
    }

    /// Replaces every occurrence of the search literal in `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> Substitution {
        let occurrences = self.count_matches(text);
        if occurrences == 0 {
            return Substitution::Unchanged;
        }

        let content = text.replace(self.search.as_str(), &self.replace);
        if content.contains(self.search.as_str()) {
            return Substitution::Incomplete { occurrences };
        }

        Substitution::Replaced {
            content,
            occurrences,
        }
    }
}
