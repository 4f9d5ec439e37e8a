//! Template rendering using Handlebars.
//!
//! Commit messages, pull request titles and bodies, and branch names are all
//! configurable Handlebars formats.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

use chrono::{DateTime, Utc};
use rand::Rng;

/// Formats a timestamp for use in a branch name.
///
/// Format: `%Y%m%d%H%M%S` in UTC.
#[must_use]
pub fn branch_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Generates a random 8-hex-digit suffix that keeps branch names unique
/// when several runs happen within the same second.
#[must_use]
pub fn generate_branch_suffix() -> String {
    format!("{:08x}", rand::rng().random::<u32>())
}
